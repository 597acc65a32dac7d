#[cfg(test)]
use chrono::NaiveDate;

#[cfg(test)]
use crate::post::PostRecord;

#[cfg(test)]
pub const POST_INTRO_WEB3: &str = "---
title: Intro to Web3
date: 2024-01-01
description: A first look at decentralised apps
tags: [Web3, Blockchain]
---

Web3 is a new way of building apps on top of public blockchains.
";

#[cfg(test)]
pub const POST_WITH_EXTRA: &str = "---
title: Portfolio update
date: 2024-04-15
coverImage: /images/cover.png
lastModified: 2024-05-10
draft: false
---
New projects added to the portfolio.
";

#[cfg(test)]
pub const POST_NO_TAGS: &str = "---
title: Untagged thoughts
date: 2023-12-24
---
Nothing to see here.
";

/// A record built in memory, bypassing the frontmatter parser.
#[cfg(test)]
pub fn sample_post(id: &str, date: &str, tags: &[&str]) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        title: id.to_string(),
        date: date.to_string(),
        description: None,
        excerpt: "...".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        content_html: None,
        extra: Default::default(),
        published: crate::text_utils::parse_date(date).unwrap_or(NaiveDate::MIN),
        body: String::new(),
    }
}
