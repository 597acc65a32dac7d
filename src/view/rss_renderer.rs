use std::io::Cursor;

use chrono::{NaiveTime, TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::FeedError;
use crate::post::PostRecord;
use crate::view::site_link;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>Blog</title>
  <link>https://example.com/</link>
  <description>Notes on web3 and frontend</description>
  <item>
    <title>React Tips</title>
    <link>https://example.com/blog/react-tips</link>
    <guid isPermaLink="true">https://example.com/blog/react-tips</guid>
    <description><![CDATA[ Hooks, memoisation...]]></description>
    <pubDate>Fri, 1 Mar 2024 00:00:00 +0000</pubDate>
    <category>React</category>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
    /// Path segment under which posts live, `blog` in `/blog/{id}`.
    pub posts_path: &'a str,
    pub max_items: Option<usize>,
}

impl<'a> RssChannel<'a> {
    /// `posts` are expected in catalog order, newest first.
    pub fn render(&self, posts: &[PostRecord]) -> Result<String, FeedError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", &site_link(self.ch_link, &[]))?;
        push_text(&mut writer, "description", self.ch_desc)?;

        let count = self.max_items.unwrap_or(posts.len());
        for post in posts.iter().take(count) {
            self.push_item(&mut writer, post)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    fn push_item(&self, writer: &mut Writer<Cursor<Vec<u8>>>, post: &PostRecord) -> Result<(), FeedError> {
        writer.write_event(Event::Start(BytesStart::new("item")))?;

        push_text(writer, "title", &post.title)?;

        let link = site_link(self.ch_link, &[self.posts_path, &post.id]);
        push_text(writer, "link", &link)?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "true"));
        writer.write_event(Event::Start(guid))?;
        writer.write_event(Event::Text(BytesText::new(&link)))?;
        writer.write_event(Event::End(BytesEnd::new("guid")))?;

        let description = post.description.as_deref().unwrap_or(&post.excerpt);
        push_cdata(writer, "description", description)?;

        let midnight = post.published.and_time(NaiveTime::MIN);
        let pub_date = Utc.from_utc_datetime(&midnight);
        push_text(writer, "pubDate", &pub_date.to_rfc2822())?;

        for tag in post.tags.iter() {
            push_text(writer, "category", tag)?;
        }

        writer.write_event(Event::End(BytesEnd::new("item")))?;
        Ok(())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(new_text.as_str())))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_post;

    use super::*;

    fn channel(max_items: Option<usize>) -> RssChannel<'static> {
        RssChannel {
            ch_title: "my feed",
            ch_link: "https://example.com",
            ch_desc: "My blog feed",
            posts_path: "blog",
            max_items,
        }
    }

    fn posts() -> Vec<PostRecord> {
        let mut first = sample_post("react-tips", "2024-03-01", &["React"]);
        first.title = "React Tips".to_string();
        first.excerpt = " Hooks and more...".to_string();
        let mut second = sample_post("web3-security", "2024-02-01", &["Web3", "Security"]);
        second.title = "Web3 Security".to_string();
        second.description = Some("Audits matter".to_string());
        vec![first, second]
    }

    #[test]
    fn render_xml() {
        let xml = channel(None).render(&posts()).unwrap();
        assert_eq!(xml, EXPECTED);
    }

    #[test]
    fn render_limits_items() {
        let xml = channel(Some(1)).render(&posts()).unwrap();
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("react-tips"));
        assert!(!xml.contains("web3-security"));
    }

    #[test]
    fn render_escapes_text_and_cdata() {
        let mut post = sample_post("amp", "2024-01-01", &[]);
        post.title = "Tom & Jerry <3".to_string();
        post.description = Some("ends with ]]> oops".to_string());
        let xml = channel(None).render(&[post]).unwrap();
        assert!(xml.contains("<title>Tom &amp; Jerry &lt;3</title>"));
        assert!(xml.contains("<![CDATA[ends with ]] > oops]]>"));
    }

    #[test]
    fn render_encodes_links() {
        let post = sample_post("c#-tips?", "2024-01-01", &[]);
        let xml = channel(None).render(&[post]).unwrap();
        assert!(xml.contains("<link>https://example.com/blog/c%23-tips%3F</link>"));
        assert!(xml.contains("<guid isPermaLink=\"true\">https://example.com/blog/c%23-tips%3F</guid>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://example.com/</link><description>My blog feed</description><item><title>React Tips</title><link>https://example.com/blog/react-tips</link><guid isPermaLink="true">https://example.com/blog/react-tips</guid><description><![CDATA[ Hooks and more...]]></description><pubDate>Fri, 1 Mar 2024 00:00:00 +0000</pubDate><category>React</category></item><item><title>Web3 Security</title><link>https://example.com/blog/web3-security</link><guid isPermaLink="true">https://example.com/blog/web3-security</guid><description><![CDATA[Audits matter]]></description><pubDate>Thu, 1 Feb 2024 00:00:00 +0000</pubDate><category>Web3</category><category>Security</category></item></channel></rss>"##;
}
