//! Bootstrap tab HTML rendering.
//!
//! Titles, language tokens and code are inserted verbatim. Callers that
//! need escaping must escape the markup before filtering.

use crate::block::{Segment, TabBlock};

/// Render a tab block as Bootstrap tab markup.
///
/// # Output HTML Structure
///
/// ```html
/// <div class="tabbable"><ul class="nav nav-tabs"><li class="active"><a data-toggle="tab" href="#content-1-0">JS</a></li>
/// <li class=""><a data-toggle="tab" href="#content-1-1">Python</a></li></ul><div class="tab-content"><div id="content-1-0" class="tab-pane fade in active"><pre><code class="language-js">console.log(1)</code></pre></div>
/// <div id="content-1-1" class="tab-pane fade in "><pre><code class="language-python">print(1)</code></pre></div></div></div>
/// ```
///
/// Each title is paired with the segment at the same position. Titles
/// without a segment render an empty pane with an empty language class;
/// segments without a title are not rendered.
pub(crate) fn render_block(block: &TabBlock) -> String {
    let empty = Segment::default();
    let mut headers = Vec::with_capacity(block.titles.len());
    let mut panes = Vec::with_capacity(block.titles.len());

    for (idx, title) in block.titles.iter().enumerate() {
        let active = if idx == 0 { "active" } else { "" };
        let pane_id = format!("content-{}-{idx}", block.index);
        let segment = block.segments.get(idx).unwrap_or(&empty);

        headers.push(format!(
            r##"<li class="{active}"><a data-toggle="tab" href="#{pane_id}">{title}</a></li>"##
        ));
        panes.push(format!(
            r#"<div id="{pane_id}" class="tab-pane fade in {active}"><pre><code class="language-{}">{}</code></pre></div>"#,
            segment.language, segment.code
        ));
    }

    let mut output = String::with_capacity(
        headers.iter().chain(&panes).map(String::len).sum::<usize>() + 128,
    );
    output.push_str(r#"<div class="tabbable"><ul class="nav nav-tabs">"#);
    output.push_str(&headers.join("\n"));
    output.push_str(r#"</ul><div class="tab-content">"#);
    output.push_str(&panes.join("\n"));
    output.push_str("</div></div>");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(index: usize, titles: &[&str], segments: Vec<Segment>) -> TabBlock {
        TabBlock {
            index,
            line: 1,
            span: 0..0,
            titles: titles.iter().map(|t| (*t).to_owned()).collect(),
            segments,
        }
    }

    #[test]
    fn test_render_two_tabs() {
        let html = render_block(&block(
            1,
            &["JS", "Python"],
            vec![
                Segment::new("js", "console.log(1)"),
                Segment::new("python", "print(1)"),
            ],
        ));

        let expected = concat!(
            r#"<div class="tabbable"><ul class="nav nav-tabs">"#,
            r##"<li class="active"><a data-toggle="tab" href="#content-1-0">JS</a></li>"##,
            "\n",
            r##"<li class=""><a data-toggle="tab" href="#content-1-1">Python</a></li>"##,
            r#"</ul><div class="tab-content">"#,
            r#"<div id="content-1-0" class="tab-pane fade in active"><pre><code class="language-js">console.log(1)</code></pre></div>"#,
            "\n",
            r#"<div id="content-1-1" class="tab-pane fade in "><pre><code class="language-python">print(1)</code></pre></div>"#,
            "</div></div>",
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_block_index_in_ids() {
        let html = render_block(&block(7, &["A"], vec![Segment::new("c", "x")]));
        assert!(html.contains(r##"href="#content-7-0""##));
        assert!(html.contains(r#"id="content-7-0""#));
    }

    #[test]
    fn test_no_escaping() {
        let html = render_block(&block(
            1,
            &["<b>A</b>"],
            vec![Segment::new("html", "<p>&amp;</p>")],
        ));
        assert!(!html.contains("&lt;b&gt;"));
        assert!(html.contains("<b>A</b></a>"));
        assert!(html.contains("<code class=\"language-html\"><p>&amp;</p></code>"));
    }

    #[test]
    fn test_empty_language_class() {
        let html = render_block(&block(1, &["Plain"], vec![Segment::new("", "text")]));
        assert!(html.contains(r#"<code class="language-">text</code>"#));
    }

    #[test]
    fn test_missing_segment_renders_empty_pane() {
        let html = render_block(&block(1, &["A", "B"], vec![Segment::new("js", "a")]));
        assert!(html.contains(
            r#"<div id="content-1-1" class="tab-pane fade in "><pre><code class="language-"></code></pre></div>"#
        ));
    }

    #[test]
    fn test_surplus_segment_is_dropped() {
        let html = render_block(&block(
            1,
            &["A"],
            vec![Segment::new("js", "a"), Segment::new("py", "b")],
        ));
        assert!(!html.contains("content-1-1"));
        assert!(!html.contains("language-py"));
    }
}
