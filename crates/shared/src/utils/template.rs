use askama::{Error, Template};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailTemplateData {
    pub site_name: String,
    pub title: String,
    pub greeting: String,
    pub message: String,
    pub button: String,
    pub link: String,
}

#[derive(Template, Debug)]
#[template(path = "email.html")]
pub struct EmailTemplate<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub greeting: &'a str,
    pub message: &'a str,
    pub button: &'a str,
    pub link: &'a str,
}

impl<'a> From<&'a EmailTemplateData> for EmailTemplate<'a> {
    fn from(data: &'a EmailTemplateData) -> Self {
        EmailTemplate {
            site_name: &data.site_name,
            title: &data.title,
            greeting: &data.greeting,
            message: &data.message,
            button: &data.button,
            link: &data.link,
        }
    }
}

pub fn render_email(data: &EmailTemplateData) -> Result<String, Error> {
    info!("📧 Rendering email template: {}", data.title);

    EmailTemplate::from(data).render().inspect_err(|e| {
        error!("❌ Failed to render email template: {e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_link_is_rendered_and_escaped() {
        let html = render_email(&EmailTemplateData {
            site_name: "Shop".into(),
            title: "Password Reset Requested".into(),
            greeting: "Hi <olena>,".into(),
            message: "Follow the link below.".into(),
            button: "Reset password".into(),
            link: "http://127.0.0.1:8000/reset-password?token=abc".into(),
        })
        .unwrap();

        assert!(html.contains("http://127.0.0.1:8000/reset-password?token=abc"));
        assert!(html.contains("Hi &#60;olena&#62;,") || html.contains("Hi &lt;olena&gt;,"));
    }
}
