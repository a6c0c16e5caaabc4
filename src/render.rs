//! HTML fragments for the profile and result pages.

use crate::models::{ScoreResult, UserProfile};

/// Placeholder shown when a user has no score yet.
pub const MISSING_SCORE: &str = "N/A";

/// Escapes text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// The four lines written into the profile container.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub job: String,
    /// The latest trust score, or [`MISSING_SCORE`].
    pub score: String,
}

impl ProfileView {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let score = profile
            .credit_profile
            .as_ref()
            .and_then(|cp| cp.digital_trust_score)
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING_SCORE.to_string());

        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            job: profile.job_type.clone(),
            score,
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<p>Name: {}</p>\n<p>Email: {}</p>\n<p>Job: {}</p>\n<p>Score: {}</p>",
            escape_html(&self.name),
            escape_html(&self.email),
            escape_html(&self.job),
            escape_html(&self.score),
        )
    }
}

/// The score, risk label and explanation list of the result page.
///
/// All parts are empty when there is no stored result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultView {
    /// `"{score}/100"`.
    pub score: Option<String>,
    /// `"Risk: {label}"`.
    pub risk: Option<String>,
    /// One entry per explanation, in server order.
    pub explanation: Vec<String>,
}

impl ResultView {
    pub fn from_result(result: &ScoreResult) -> Self {
        Self {
            score: Some(format!("{}/100", result.digital_trust_score)),
            risk: Some(format!("Risk: {}", result.risk_category)),
            explanation: result.explanation.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.score.is_none() && self.risk.is_none() && self.explanation.is_empty()
    }

    /// Renders the populated parts; an empty view renders as an empty string.
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        if let Some(score) = &self.score {
            html.push_str(&format!(
                "<div id=\"score-circle\">{}</div>\n",
                escape_html(score)
            ));
        }
        if let Some(risk) = &self.risk {
            html.push_str(&format!("<p id=\"risk\">{}</p>\n", escape_html(risk)));
        }
        if !self.explanation.is_empty() {
            html.push_str("<ul id=\"explanation\">\n");
            for item in &self.explanation {
                html.push_str(&format!("  <li>{}</li>\n", escape_html(item)));
            }
            html.push_str("</ul>\n");
        }

        html
    }
}
