// src/extractor.rs

use crate::models::Link;
use regex::Regex;
use std::sync::LazyLock;

// 链接以空白或 , ; " ' < > 之一结束
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s,;"'<>]+"#).unwrap());

/// 单元格引用，例如 ('B', 17) -> "B17"
pub fn cell_reference(column: char, row: usize) -> String {
    format!("{}{}", column, row)
}

/// 按出现顺序提取单元格中的全部链接，序号从 1 开始，不去重
pub fn extract_links(text: &str, cell_reference: &str) -> Vec<Link> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    LINK_RE
        .find_iter(text)
        .enumerate()
        .map(|(i, m)| Link {
            raw_url: m.as_str().to_string(),
            cell_reference: cell_reference.to_string(),
            position_index: i + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.raw_url.as_str()).collect()
    }

    #[test]
    fn test_extract_in_order_with_indices() {
        let text = "видео: https://youtu.be/abc, фото https://a.example/p.jpg;\nи http://news.example/1";
        let links = extract_links(text, "B17");
        assert_eq!(
            urls(&links),
            vec!["https://youtu.be/abc", "https://a.example/p.jpg", "http://news.example/1"]
        );
        assert_eq!(
            links.iter().map(|l| l.position_index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(links.iter().all(|l| l.cell_reference == "B17"));
    }

    #[test]
    fn test_delimiters_terminate_links() {
        let text = r#"<a href="https://x.example/a">'https://y.example/b'</a>"#;
        assert_eq!(
            urls(&extract_links(text, "A1")),
            vec!["https://x.example/a", "https://y.example/b"]
        );
    }

    #[test]
    fn test_repeated_links_are_kept() {
        let links = extract_links("https://a.example https://a.example", "C2");
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].position_index, 2);
    }

    #[test]
    fn test_empty_and_plain_text() {
        assert!(extract_links("", "A1").is_empty());
        assert!(extract_links("   \n\t", "A1").is_empty());
        assert!(extract_links("нет ссылок, ftp://x.example", "A1").is_empty());
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference('B', 17), "B17");
    }
}
