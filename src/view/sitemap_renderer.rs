use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::catalog::Catalog;
use crate::error::FeedError;
use crate::text_utils::format_date;
use crate::view::site_link;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url><loc>https://example.com/blog/react-tips</loc><lastmod>2024-03-01</lastmod></url>
  <url><loc>https://example.com/tags/react</loc></url>
</urlset>
*/

pub struct Sitemap<'a> {
    pub site_url: &'a str,
    /// Static pages, relative to the site root. `""` is the home page.
    pub pages: &'a [String],
    pub posts_path: &'a str,
    pub tags_path: &'a str,
}

impl<'a> Sitemap<'a> {
    /// Static pages first, then every post in catalog order, then every tag
    /// in slug order.
    pub fn render(&self, catalog: &Catalog) -> Result<String, FeedError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for page in self.pages.iter() {
            push_url(&mut writer, &site_link(self.site_url, &[page]), None)?;
        }

        for post in catalog.posts() {
            let loc = site_link(self.site_url, &[self.posts_path, &post.id]);
            let lastmod = format_date(&post.last_modified());
            push_url(&mut writer, &loc, Some(&lastmod))?;
        }

        for tag in catalog.tags().iter() {
            push_url(&mut writer, &site_link(self.site_url, &[self.tags_path, &tag.slug]), None)?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }
}

fn push_url(writer: &mut Writer<Cursor<Vec<u8>>>, loc: &str, lastmod: Option<&str>) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new("url")))?;
    push_text(writer, "loc", loc)?;
    if let Some(lastmod) = lastmod {
        push_text(writer, "lastmod", lastmod)?;
    }
    writer.write_event(Event::End(BytesEnd::new("url")))?;
    Ok(())
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
