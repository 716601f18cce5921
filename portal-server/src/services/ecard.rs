//! Digital membership card
//!
//! Builds the card view of a membership, renders it as a downloadable SVG
//! (90 x 55 mm) and composes WhatsApp / email deep links. The links carry the
//! message only; attaching the downloaded card is left to the user.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{MemberStatus, MemberWithClub};
use shared::{AppError, ErrorCode};
use thiserror::Error;
use url::Url;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "150x150";

#[derive(Error, Debug)]
pub enum EcardError {
    #[error("SVG formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Invalid verify URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<EcardError> for AppError {
    fn from(err: EcardError) -> Self {
        tracing::error!(error = %err, "Card rendering failed");
        AppError::new(ErrorCode::CardRenderFailed)
    }
}

/// Everything printed on the card
#[derive(Debug, Clone, Serialize)]
pub struct EcardView {
    pub member_id: String,
    /// Upper-cased id as printed
    pub display_id: String,
    pub full_name: String,
    pub ic_no: String,
    pub club_name: String,
    pub status: MemberStatus,
    pub applied_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<NaiveDate>,
    pub profile_pic_url: String,
    pub verify_url: String,
    pub qr_url: String,
}

/// `{base}/verify/{member_id}`
pub fn verify_url(base_url: &str, member_id: &str) -> String {
    format!(
        "{}/verify/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(member_id)
    )
}

/// QR image URL encoding `data`
pub fn qr_url(data: &str) -> Result<String, EcardError> {
    let url = Url::parse_with_params(QR_ENDPOINT, &[("size", QR_SIZE), ("data", data)])?;
    Ok(url.to_string())
}

pub fn build_view(member: &MemberWithClub, base_url: &str) -> Result<EcardView, EcardError> {
    let m = &member.member;
    let verify = verify_url(base_url, &m.id);
    Ok(EcardView {
        member_id: m.id.clone(),
        display_id: m.id.to_uppercase(),
        full_name: m.full_name.clone(),
        ic_no: m.ic_no.clone(),
        club_name: member.club_name.clone(),
        status: m.status,
        applied_date: m.applied_date,
        approved_date: m.approved_date,
        profile_pic_url: m.profile_pic_url.clone(),
        qr_url: qr_url(&verify)?,
        verify_url: verify,
    })
}

/// Download name of the card file
pub fn file_name(member_id: &str) -> String {
    format!("eCard-{}.svg", member_id)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Card as a standalone SVG document
pub fn render_svg(view: &EcardView) -> Result<String, EcardError> {
    let mut svg = String::new();
    writeln!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="90mm" height="55mm" viewBox="0 0 340 210">"##
    )?;
    writeln!(svg, r##"  <rect width="340" height="210" rx="16" fill="#0f172a"/>"##)?;
    writeln!(svg, r##"  <circle cx="330" cy="0" r="120" fill="#f59e0b" opacity="0.2"/>"##)?;
    writeln!(svg, r##"  <rect x="0" y="24" width="8" height="48" rx="3" fill="#f59e0b"/>"##)?;
    writeln!(
        svg,
        r##"  <text x="24" y="40" font-family="sans-serif" font-size="10" font-weight="bold" letter-spacing="2" fill="#f59e0b">AHLI BERDAFTAR</text>"##
    )?;
    writeln!(
        svg,
        r##"  <text x="24" y="58" font-family="sans-serif" font-size="14" font-weight="bold" fill="#ffffff">{}</text>"##,
        escape_xml(&view.club_name)
    )?;
    writeln!(
        svg,
        r##"  <text x="24" y="120" font-family="sans-serif" font-size="9" fill="#94a3b8">NAMA AHLI</text>"##
    )?;
    writeln!(
        svg,
        r##"  <text x="24" y="136" font-family="sans-serif" font-size="13" font-weight="bold" fill="#fffbeb">{}</text>"##,
        escape_xml(&view.full_name)
    )?;
    writeln!(
        svg,
        r##"  <text x="24" y="166" font-family="sans-serif" font-size="9" fill="#94a3b8">NO. ID</text>"##
    )?;
    writeln!(
        svg,
        r##"  <text x="24" y="182" font-family="monospace" font-size="12" fill="#fbbf24">{}</text>"##,
        escape_xml(&view.display_id)
    )?;
    writeln!(
        svg,
        r##"  <text x="130" y="166" font-family="sans-serif" font-size="9" fill="#94a3b8">STATUS</text>"##
    )?;
    writeln!(
        svg,
        r##"  <text x="130" y="182" font-family="monospace" font-size="12" fill="#ffffff">{}</text>"##,
        view.status
    )?;
    writeln!(
        svg,
        r##"  <rect x="242" y="112" width="76" height="76" rx="8" fill="#ffffff"/>"##
    )?;
    writeln!(
        svg,
        r##"  <image x="248" y="118" width="64" height="64" href="{0}" xlink:href="{0}"/>"##,
        escape_xml(&view.qr_url)
    )?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Digits only, with the Malaysian 60 prefix
///
/// `012-345 6789` -> `60123456789`; numbers already starting with 60 are
/// kept; anything else is passed through as digits. `None` when no digits.
pub fn whatsapp_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with("60") {
        Some(digits)
    } else if digits.starts_with('0') {
        Some(format!("6{}", digits))
    } else {
        Some(digits)
    }
}

/// Deep links for sending the card
#[derive(Debug, Clone, Serialize)]
pub struct ShareLinks {
    pub message: String,
    pub subject: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_url: Option<String>,
}

pub fn share_message(full_name: &str) -> String {
    format!(
        "Salam {}, berikut adalah Kad Keahlian Digital SPKA anda (PDF).",
        full_name
    )
}

pub fn share_links(member: &MemberWithClub) -> ShareLinks {
    let m = &member.member;
    let message = share_message(&m.full_name);
    let subject = format!("Kad Keahlian Digital SPKA - {}", m.id);

    let whatsapp_url = whatsapp_phone(&m.phone).map(|phone| {
        format!(
            "https://wa.me/{}?text={}",
            phone,
            urlencoding::encode(&message)
        )
    });
    let email = m.email.trim();
    let email_url = (!email.is_empty()).then(|| {
        format!(
            "mailto:{}?subject={}&body={}",
            email,
            urlencoding::encode(&subject),
            urlencoding::encode(&message)
        )
    });

    ShareLinks {
        file_name: file_name(&m.id),
        message,
        subject,
        whatsapp_url,
        email_url,
    }
}

/// Public sign-up link for a club
pub fn club_registration_link(base_url: &str, club_id: &str) -> String {
    format!(
        "{}/register/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(club_id)
    )
}

/// Public sign-up link for a partner program
pub fn program_registration_link(base_url: &str, partner_id: &str, program_id: &str) -> String {
    format!(
        "{}/register-program/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(partner_id),
        urlencoding::encode(program_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{PortalStore, member};

    const BASE: &str = "https://spka.example.my";

    fn ali() -> MemberWithClub {
        member::find_by_id(&PortalStore::seeded(), "m1").unwrap()
    }

    #[test]
    fn test_view_links() {
        let view = build_view(&ali(), BASE).unwrap();
        assert_eq!(view.display_id, "M1");
        assert_eq!(view.club_name, "Kelab Sukan JKR");
        assert_eq!(view.verify_url, "https://spka.example.my/verify/m1");
        assert!(view.qr_url.starts_with(
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=https%3A%2F%2Fspka.example.my%2Fverify%2Fm1"
        ));
    }

    #[test]
    fn test_svg_escapes_text() {
        let mut m = ali();
        m.member.full_name = "Muthu A/L <Sami> & Co".into();
        let svg = render_svg(&build_view(&m, BASE).unwrap()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"90mm\" height=\"55mm\""));
        assert!(svg.contains("Muthu A/L &lt;Sami&gt; &amp; Co"));
        assert!(!svg.contains("<Sami>"));
        assert!(svg.contains("ACTIVE"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_whatsapp_phone() {
        assert_eq!(whatsapp_phone("012-345 6789").as_deref(), Some("60123456789"));
        assert_eq!(whatsapp_phone("+60 12 345 6789").as_deref(), Some("60123456789"));
        assert_eq!(whatsapp_phone("123456").as_deref(), Some("123456"));
        assert_eq!(whatsapp_phone("n/a"), None);
    }

    #[test]
    fn test_share_links() {
        let links = share_links(&ali());
        assert_eq!(
            links.message,
            "Salam Ali Bin Abu, berikut adalah Kad Keahlian Digital SPKA anda (PDF)."
        );
        assert_eq!(links.file_name, "eCard-m1.svg");
        let wa = links.whatsapp_url.unwrap();
        assert!(wa.starts_with("https://wa.me/60123456789?text=Salam%20Ali%20Bin%20Abu%2C"));
        let mail = links.email_url.unwrap();
        assert!(mail.starts_with(
            "mailto:ali@gmail.com?subject=Kad%20Keahlian%20Digital%20SPKA%20-%20m1&body="
        ));
    }

    #[test]
    fn test_share_without_email() {
        let mut m = ali();
        m.member.email = " ".into();
        assert!(share_links(&m).email_url.is_none());
    }

    #[test]
    fn test_registration_links() {
        assert_eq!(
            club_registration_link("http://localhost:3000/", "c1"),
            "http://localhost:3000/register/c1"
        );
        assert_eq!(
            program_registration_link(BASE, "p1", "prog-1"),
            "https://spka.example.my/register-program/p1/prog-1"
        );
    }
}
