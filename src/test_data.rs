#[cfg(test)]
pub const NOTE_POST: &str = r#"{
    "type": ["h-entry"],
    "properties": {
        "content": ["test\npost"],
        "published": ["2019-08-29T02:03:05.429827"]
    }
}"#;

#[cfg(test)]
pub const REPLY_POST: &str = r#"{
    "type": ["h-entry"],
    "properties": {
        "content": ["Nice write up!"],
        "summary": ["A reply"],
        "category": ["rust", "indieweb"],
        "published": ["2019-08-29T02:03:05.429827"],
        "author": [{
            "type": ["h-card"],
            "properties": {
                "name": ["Jane Doe"],
                "url": ["https://jane.example.com"]
            }
        }],
        "in-reply-to": [{
            "type": ["h-cite"],
            "properties": {
                "name": ["Post one"],
                "url": ["https://example.com/post/1"]
            }
        }]
    }
}"#;

#[cfg(test)]
pub const NOTEDOWN_REPLY: &str = "in-reply-to: https://example.com/post/1
date: 2019-08-29 02:03
tags: rust

Totally agree with @jane about #rust
see https://rust-lang.org
";

#[cfg(test)]
pub const NOTEDOWN_ARTICLE: &str = "Title: Notes on notedown
Date: 2019-08-29 02:03

## Intro
Some **bold** text
";
