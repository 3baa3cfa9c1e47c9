use super::escape_html;
use crate::core::resume::{analyze_resume, ResumeAnalysis, MAX_SCORE};
use axum::extract::Form;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

const STYLE: &str = "
body { background: #0f172a; color: white; font-family: Arial; display: flex; justify-content: center; align-items: center; min-height: 100vh; }
.container { background: #020617; padding: 20px; border-radius: 12px; width: 90%; max-width: 700px; }
textarea { width: 100%; height: 200px; padding: 10px; border-radius: 8px; }
button { margin-top: 10px; padding: 10px; width: 100%; border: none; border-radius: 8px; background: #22c55e; font-weight: bold; }
.score { font-size: 24px; margin-top: 10px; }
.bad { color: #f87171; }
.good { color: #4ade80; }
";

#[derive(Debug, Deserialize)]
pub struct ResumeForm {
    #[serde(default)]
    pub resume: String,
}

pub fn router() -> Router {
    Router::new().route("/", get(form).post(analyze))
}

async fn form() -> Html<String> {
    Html(render_page("", None))
}

async fn analyze(Form(form): Form<ResumeForm>) -> Html<String> {
    let analysis = analyze_resume(&form.resume);
    tracing::info!(
        "Analyzed resume: score {} with {} skills",
        analysis.score,
        analysis.skills_found.len()
    );
    Html(render_page(&form.resume, Some(&analysis)))
}

/// The submitted text is echoed back into the form.
pub fn render_page(resume: &str, analysis: Option<&ResumeAnalysis>) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Resume Analyzer</title>\n<style>{}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<h2>📄 Resume Analyzer</h2>\n<form method=\"POST\">\n\
         <textarea name=\"resume\" placeholder=\"Paste your resume here...\">{}</textarea>\n\
         <button type=\"submit\">Analyze Resume</button>\n</form>\n",
        STYLE,
        escape_html(resume)
    );

    if let Some(a) = analysis {
        html.push_str(&format!(
            "<div class=\"score\">ATS Score: {} / {}</div>\n",
            a.score, MAX_SCORE
        ));
        html.push_str("<h3>Skills Detected:</h3>\n");
        html.push_str(&format!("<p>{}</p>\n", escape_html(&a.skills_found.join(", "))));
        html.push_str("<h3>Feedback:</h3>\n<ul>\n");
        for f in &a.feedback {
            html.push_str(&format!("<li class=\"bad\">{}</li>\n", escape_html(f)));
        }
        if a.feedback.is_empty() {
            html.push_str("<li class=\"good\">Great resume! Minor improvements only.</li>\n");
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_only_without_analysis() {
        let html = render_page("", None);
        assert!(html.contains("<textarea name=\"resume\""));
        assert!(!html.contains("ATS Score"));
    }

    #[test]
    fn test_analysis_is_rendered_escaped() {
        let text = "Summary\n<b>python</b> & sql";
        let analysis = analyze_resume(text);
        let html = render_page(text, Some(&analysis));
        assert!(html.contains("&lt;b&gt;python&lt;/b&gt; &amp; sql</textarea>"));
        assert!(html.contains("<p>python, sql</p>"));
        assert!(html.contains("class=\"bad\""));
    }
}
