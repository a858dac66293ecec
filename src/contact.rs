//! Contact-form submissions.
//!
//! The pipeline mirrors the public form: check that the mailer is configured,
//! charge the client's rate budget, drop bot traffic caught by the honeypot,
//! validate the visible fields, then send the notification.
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{error::AppError, mail::Notification, state::AppState};

/// One contact-form submission. Absent JSON fields deserialize as empty
/// strings so they fail field validation instead of rejecting the body.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Honeypot. Hidden on the form; humans leave it empty.
    pub gotcha: String,
}

#[derive(Debug)]
pub enum Outcome {
    Sent,
    /// Honeypot tripped: the caller is told the send succeeded, but nothing
    /// leaves the server.
    Discarded,
}

pub async fn process_submission(
    state: &AppState,
    client_ip: &str,
    submission: Submission,
) -> Result<Outcome, AppError> {
    let mailer = state.mailer.as_ref().ok_or(AppError::MissingMailConfig)?;

    if !state.rate_limiter.try_acquire(client_ip).await {
        return Err(AppError::RateLimited);
    }

    if !submission.gotcha.trim().is_empty() {
        debug!("Honeypot tripped for {client_ip}, discarding submission");
        return Ok(Outcome::Discarded);
    }

    if [
        &submission.name,
        &submission.email,
        &submission.subject,
        &submission.message,
    ]
    .iter()
    .any(|field| field.trim().is_empty())
    {
        return Err(AppError::MissingFields);
    }

    mailer.send(&build_notification(&submission)).await?;

    info!("Contact notification sent for {client_ip}");

    Ok(Outcome::Sent)
}

pub fn build_notification(submission: &Submission) -> Notification {
    let received = Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();

    let text = format!(
        "Name: {}\nEmail: {}\nSubject: {}\nReceived: {}\n\nMessage:\n{}\n",
        submission.name, submission.email, submission.subject, received, submission.message
    );

    let html = format!(
        "<h3>New contact form submission</h3>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subject:</strong> {}</p>\n\
         <p><strong>Received:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(&submission.subject),
        received,
        escape_html(&submission.message).replace('\n', "<br>")
    );

    Notification {
        reply_to: submission.email.clone(),
        subject: format!("New contact form submission: {}", submission.subject),
        text,
        html,
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
