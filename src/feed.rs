//! RSS 2.0 serialization.

use std::io::Write;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::ChannelMeta;
use crate::date::{format_pub_date, normalize_pub_date};
use crate::error::Result;
use crate::extract::ExtractedRecord;
use crate::text::sanitize_xml_text;

/// A record ready for the feed: `pub_date` is always a formatted RFC 2822
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub pub_date: String,
}

impl From<ExtractedRecord> for NormalizedRecord {
    fn from(rec: ExtractedRecord) -> Self {
        let pub_date = normalize_pub_date(rec.raw_date.as_deref());
        NormalizedRecord {
            title: rec.title,
            link: rec.link,
            summary: rec.summary,
            pub_date,
        }
    }
}

/// Build the complete document, stamping `lastBuildDate` with the current
/// time.
pub fn assemble(channel: &ChannelMeta, records: &[NormalizedRecord]) -> Result<Vec<u8>> {
    assemble_at(channel, records, Utc::now())
}

pub fn assemble_at(
    channel: &ChannelMeta,
    records: &[NormalizedRecord],
    built_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;
    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_text_element(&mut writer, "lastBuildDate", &format_pub_date(&built_at))?;
    write_text_element(&mut writer, "ttl", &channel.ttl_minutes.to_string())?;

    for it in records {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &it.title)?;
        write_text_element(&mut writer, "link", &it.link)?;
        write_text_element(&mut writer, "guid", &it.link)?;
        write_text_element(&mut writer, "description", &it.summary)?;
        write_text_element(&mut writer, "pubDate", &it.pub_date)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn write_text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    let s = sanitize_xml_text(text);
    w.write_event(Event::Text(BytesText::new(&s)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn channel() -> ChannelMeta {
        ChannelMeta {
            title: "Test & Co".into(),
            link: "https://example.com/analysis".into(),
            description: "Testing".into(),
            ttl_minutes: 60,
        }
    }

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn declaration_and_channel_metadata() {
        let built = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let xml = as_text(assemble_at(&channel(), &[], built).unwrap());

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#), "{xml}");
        assert!(xml.contains(r#"<rss version="2.0">"#));
        assert!(xml.contains("<title>Test &amp; Co</title>"));
        assert!(xml.contains("<lastBuildDate>Tue, 05 Mar 2024 12:00:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<ttl>60</ttl>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn item_guid_mirrors_link_and_text_is_escaped() {
        let rec = NormalizedRecord {
            title: "A <b> title".into(),
            link: "https://example.com/a?x=1&y=2".into(),
            summary: String::new(),
            pub_date: "Tue, 05 Mar 2024 00:00:00 +0000".into(),
        };
        let xml = as_text(assemble(&channel(), &[rec]).unwrap());

        assert!(xml.contains("<title>A &lt;b&gt; title</title>"));
        assert!(xml.contains("<link>https://example.com/a?x=1&amp;y=2</link>"));
        assert!(xml.contains("<guid>https://example.com/a?x=1&amp;y=2</guid>"));
        assert!(xml.contains("<pubDate>Tue, 05 Mar 2024 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn normalizes_from_extracted() {
        let rec: NormalizedRecord = ExtractedRecord {
            title: "t".into(),
            link: "https://example.com/t".into(),
            summary: "s".into(),
            raw_date: Some("2024-03-05".into()),
        }
        .into();
        assert_eq!(rec.pub_date, "Tue, 05 Mar 2024 00:00:00 +0000");
        assert_eq!(rec.summary, "s");
    }
}
