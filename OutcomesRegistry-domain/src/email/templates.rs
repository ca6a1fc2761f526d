use serde::Serialize;
use tera::{Context, Tera};

use super::EmailError;
use crate::entities::email::{ApprovalEmailRequest, ClinicContact, DeclineEmailRequest};

const BASE_TEMPLATE: &str = include_str!("templates/base.html");
const APPROVAL_TEMPLATE: &str = include_str!("templates/approval.html");
const DECLINE_TEMPLATE: &str = include_str!("templates/decline.html");

/// Subject and HTML body of a rendered email
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

#[derive(Serialize)]
struct ApprovalView<'a> {
    name: &'a str,
    clinic: &'a ClinicContact,
    appointment_details: Option<&'a str>,
}

#[derive(Serialize)]
struct DeclineView<'a> {
    name: &'a str,
    clinic: &'a ClinicContact,
    reason: Option<&'a str>,
}

/// Templates are named `*.html`, so tera autoescapes every variable
fn templates() -> Result<Tera, EmailError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("approval.html", APPROVAL_TEMPLATE),
        ("decline.html", DECLINE_TEMPLATE),
    ])
    .map_err(|e| EmailError::Template(e.to_string()))?;
    Ok(tera)
}

fn render<T: Serialize>(template_name: &str, view: &T) -> Result<String, EmailError> {
    let context = Context::from_serialize(view).map_err(|e| EmailError::Template(e.to_string()))?;
    templates()?
        .render(template_name, &context)
        .map_err(|e| EmailError::Template(e.to_string()))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Welcome email for a lead accepted into care
pub fn render_approval(request: &ApprovalEmailRequest, clinic: &ClinicContact) -> Result<RenderedEmail, EmailError> {
    let view = ApprovalView {
        name: request.name.trim(),
        clinic,
        appointment_details: non_blank(request.appointment_details.as_deref()),
    };

    Ok(RenderedEmail {
        subject: format!("You're approved for care at {}", clinic.name),
        html: render("approval.html", &view)?,
    })
}

/// Courtesy email for a lead the clinic cannot take on
pub fn render_decline(request: &DeclineEmailRequest, clinic: &ClinicContact) -> Result<RenderedEmail, EmailError> {
    let view = DeclineView {
        name: request.name.trim(),
        clinic,
        reason: non_blank(request.reason.as_deref()),
    };

    Ok(RenderedEmail {
        subject: format!("An update on your request to {}", clinic.name),
        html: render("decline.html", &view)?,
    })
}
