pub mod web_scrape;

pub use web_scrape::{match_keywords, WebScraper, WEB_SCRAPE};
