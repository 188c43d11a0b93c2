use ammonia::clean_text;

use crate::entities::contact::Contact;

pub fn contact_subject(contact: &Contact) -> String {
    format!("Portfolio Contact: {}", contact.subject)
}

/// Renders the notification body. All visitor-supplied text is escaped.
pub fn contact_html(contact: &Contact) -> String {
    let message = clean_text(&contact.message).replace("&#10;", "<br>");

    format!(
        "<h3>New Contact Form Submission</h3>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <p><strong>Message:</strong></p>\
         <p>{}</p>",
        clean_text(&contact.name),
        clean_text(&contact.email),
        clean_text(&contact.subject),
        message,
    )
}
