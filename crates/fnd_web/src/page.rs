use fnd_core::Submission;
use crate::render::Message;

pub const PAGE_TITLE: &str = "AI Phát hiện Tin giả";

/// One model's column in the results area.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub heading: Message,
    pub message: Message,
}

/// Everything the page shows for one request.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// Load errors, shown above the form.
    pub notices: Vec<Message>,
    pub warning: Option<Message>,
    /// Field values echoed back into the form.
    pub submission: Submission,
    pub panels: Option<Vec<PanelView>>,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn message_html(message: &Message) -> String {
    format!(
        "<div class=\"msg {}\">{}</div>\n",
        message.severity.css_class(),
        escape_html(&message.text)
    )
}

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; box-sizing: border-box; margin-bottom: 1rem; }
button { width: 100%; padding: .6rem; font-size: 1rem; }
.msg { padding: .75rem 1rem; border-radius: .4rem; margin: .5rem 0; }
.error { background: #fde8e8; color: #9b1c1c; }
.warning { background: #fdf6b2; color: #723b13; }
.success { background: #def7ec; color: #03543f; }
.info { background: #e1effe; color: #1e429f; }
.plain { font-family: monospace; }
.results { display: flex; gap: 1rem; }
.results > section { flex: 1; }
"#;

pub fn render_page(view: &PageView) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"vi\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>🕵️‍♀️ {}</title>\n", PAGE_TITLE));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>🕵️‍♀️ Hệ thống Phát hiện Tin giả</h1>\n");
    html.push_str("<p>Nhập tiêu đề và nội dung bài báo để kiểm tra độ tin cậy.</p>\n<hr>\n");

    for notice in &view.notices {
        html.push_str(&message_html(notice));
    }

    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str("<label for=\"title\">📝 Tiêu đề bài viết:</label>\n");
    html.push_str(&format!(
        "<textarea id=\"title\" name=\"title\" rows=\"3\" placeholder=\"Nhập tiêu đề tin tức ở đây...\">\n{}</textarea>\n",
        escape_html(&view.submission.title)
    ));
    html.push_str("<label for=\"text\">📄 Nội dung chi tiết:</label>\n");
    html.push_str(&format!(
        "<textarea id=\"text\" name=\"text\" rows=\"9\" placeholder=\"Nhập nội dung đầy đủ của bài báo...\">\n{}</textarea>\n",
        escape_html(&view.submission.text)
    ));
    html.push_str("<button type=\"submit\">🔍 Kiểm tra ngay</button>\n</form>\n");

    if let Some(warning) = &view.warning {
        html.push_str(&message_html(warning));
    }

    if let Some(panels) = &view.panels {
        html.push_str("<h3>📊 Kết quả phân tích:</h3>\n<div class=\"results\">\n");
        for panel in panels {
            html.push_str("<section class=\"panel\">\n");
            html.push_str(&message_html(&panel.heading));
            html.push_str(&message_html(&panel.message));
            html.push_str("</section>\n");
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
