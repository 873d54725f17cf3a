//! Verification email content.

use spinwin_core::otp::OTP_TTL_SECS;

/// Subject plus plain-text and HTML bodies of one email.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Email carrying a verification `code`, branded with `brand`.
pub fn otp_email(code: &str, brand: &str) -> EmailContent {
    let minutes = OTP_TTL_SECS / 60;
    let subject = format!("{brand}: your verification code");

    let text = format!(
        "{brand} - your offer awaits!\n\n\
         Your verification code: {code}\n\n\
         Enter this 6-digit code on the {brand} website to claim your offer.\n\n\
         - The code expires in {minutes} minutes\n\
         - It can be used only once\n\
         - Never share it with anyone\n"
    );

    let html = format!(
        "<!DOCTYPE html>\
         <html><head><meta charset=\"utf-8\"><title>{brand} verification</title></head>\
         <body style=\"font-family: Arial, sans-serif; background-color: #fef7ed;\">\
         <div style=\"max-width: 600px; margin: 0 auto; padding: 20px;\">\
         <h1 style=\"color: #ea580c;\">{brand}</h1>\
         <p>Enter this code to claim your offer:</p>\
         <div style=\"font-size: 2.5rem; font-weight: bold; letter-spacing: 8px; \
         font-family: 'Courier New', monospace;\">{code}</div>\
         <ul>\
         <li>The code expires in {minutes} minutes</li>\
         <li>It can be used only once</li>\
         </ul>\
         <p style=\"color: #6b7280; font-size: 0.9rem;\">This code is confidential. \
         Never share it with anyone.</p>\
         </div></body></html>"
    );

    EmailContent {
        subject,
        text,
        html,
    }
}
