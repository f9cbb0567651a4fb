pub mod assets;

use std::fmt::Write;

use crate::controller::View;
use crate::models::student::{COURSES, GENDERS, StudentRecord};
use crate::models::submission::RegistrationForm;
use crate::models::{Field, FieldErrors};

const TITLE: &str = "Student Registration";

/// Client-side filter attached to a text control, if any.
fn input_filter(field: Field) -> Option<&'static str> {
    match field {
        Field::FirstName | Field::MiddleName | Field::LastName => Some("name"),
        Field::StudentNumber => Some("studentno"),
        Field::Contact => Some("contact"),
        _ => None,
    }
}

pub fn render(view: &View) -> String {
    let body = match view {
        View::Form { values, errors } => render_form(values, errors),
        View::Summary { records } => render_summary(records),
    };
    page(TITLE, &body)
}

pub fn render_error(heading: &str, message: &str) -> String {
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Back to registration</a></p>\n",
        escape_html(heading),
        escape_html(message)
    );
    page(heading, &body)
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/assets/registration.css\">\n\
         <script src=\"/assets/registration.js\" defer></script>\n\
         </head>\n\
         <body>\n\
         <div class=\"header\"><h1>{TITLE}</h1></div>\n\
         <div class=\"container\">\n{body}</div>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

fn render_form(values: &RegistrationForm, errors: &FieldErrors) -> String {
    let mut html = String::from("<form method=\"POST\" action=\"/\">\n");

    for field in [
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::StudentNumber,
    ] {
        text_input(&mut html, field, values, errors);
    }

    labelled(&mut html, Field::Age, true);
    let _ = writeln!(
        html,
        "<input type=\"number\" id=\"{0}\" name=\"{0}\" min=\"1\" max=\"120\" value=\"{1}\">",
        Field::Age,
        escape_html(&values.age)
    );
    error_slot(&mut html, Field::Age, errors);

    labelled(&mut html, Field::Gender, false);
    select(&mut html, Field::Gender, &GENDERS, &values.gender);
    error_slot(&mut html, Field::Gender, errors);

    text_input(&mut html, Field::Address, values, errors);
    text_input(&mut html, Field::Contact, values, errors);
    text_input(&mut html, Field::Email, values, errors);

    labelled(&mut html, Field::Course, true);
    select(&mut html, Field::Course, &COURSES, &values.course);
    error_slot(&mut html, Field::Course, errors);

    html.push_str("<button type=\"submit\" name=\"register\" value=\"1\">Register</button>\n");
    html.push_str("</form>\n");
    html
}

fn labelled(html: &mut String, field: Field, required: bool) {
    let marker = if required { " *" } else { "" };
    let _ = writeln!(
        html,
        "<label for=\"{field}\">{}{marker}</label>",
        field.label()
    );
}

fn text_input(
    html: &mut String,
    field: Field,
    values: &RegistrationForm,
    errors: &FieldErrors,
) {
    labelled(html, field, true);

    let mut attributes = String::new();
    if let Some(filter) = input_filter(field) {
        let _ = write!(attributes, " data-filter=\"{filter}\"");
    }
    if errors.contains(field) {
        attributes.push_str(" aria-invalid=\"true\"");
    }
    match field {
        Field::StudentNumber => attributes.push_str(" placeholder=\"24-00000 or 27-00000\""),
        Field::Contact => attributes.push_str(" placeholder=\"11 digits\""),
        _ => {}
    }

    let _ = writeln!(
        html,
        "<input type=\"text\" id=\"{field}\" name=\"{field}\"{attributes} value=\"{}\">",
        escape_html(values.value(field))
    );
    error_slot(html, field, errors);
}

/// A submitted value outside `options` is kept as an extra selected option
/// so the echo never silently drops it.
fn select(html: &mut String, field: Field, options: &[&str], current: &str) {
    let _ = writeln!(html, "<select id=\"{field}\" name=\"{field}\">");
    html.push_str("<option value=\"\">--Select--</option>\n");
    for option in options {
        let selected = if *option == current { " selected" } else { "" };
        let escaped = escape_html(option);
        let _ = writeln!(
            html,
            "<option value=\"{escaped}\"{selected}>{escaped}</option>"
        );
    }
    if !current.is_empty() && !options.contains(&current) {
        let escaped = escape_html(current);
        let _ = writeln!(html, "<option value=\"{escaped}\" selected>{escaped}</option>");
    }
    html.push_str("</select>\n");
}

fn error_slot(html: &mut String, field: Field, errors: &FieldErrors) {
    let message = errors.get(field).unwrap_or("");
    let _ = writeln!(
        html,
        "<div class=\"error\" data-field=\"{field}\">{}</div>",
        escape_html(message)
    );
}

fn render_summary(records: &[StudentRecord]) -> String {
    let mut html = String::from("<h2>Registered Students</h2>\n");
    html.push_str("<div class=\"table-container\">\n<table>\n<thead>\n<tr>");
    for heading in [
        "Student No",
        "Name",
        "Age",
        "Gender",
        "Address",
        "Contact",
        "Email",
        "Course",
    ] {
        let _ = write!(html, "<th>{heading}</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        html.push_str("<tr>");
        for cell in [
            record.student_number.clone(),
            record.full_name(),
            record.age.to_string(),
            record.gender_or_blank().to_string(),
            record.address.clone(),
            record.contact.clone(),
            record.email.clone(),
            record.course.clone(),
        ] {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
    html.push_str(
        "<form method=\"POST\" action=\"/\">\n\
         <button type=\"submit\" name=\"home\" value=\"1\">Register Another Student</button>\n\
         </form>\n",
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::fixtures::ana;
    use crate::models::submission::fixtures::ana_form;

    #[test]
    fn test_escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_blank_form_has_every_control_and_no_errors() {
        let html = render(&View::blank_form());

        for field in Field::REQUIRED.iter().chain([&Field::Gender]) {
            assert!(html.contains(&format!("name=\"{field}\"")), "{field}");
        }
        assert!(html.contains("name=\"register\""));
        assert!(!html.contains("is required."));
    }

    #[test]
    fn test_form_echoes_values_and_errors_escaped() {
        let mut values = ana_form();
        values.address = "<script>alert(1)</script>".to_string();
        values.course = COURSES[1].to_string();
        let mut errors = FieldErrors::new();
        errors.insert(Field::Contact, "Contact number must be exactly 11 digits.");

        let html = render(&View::Form { values, errors });

        assert!(html.contains("value=\"&lt;script&gt;alert(1)&lt;/script&gt;\""));
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains(
            "<div class=\"error\" data-field=\"contact\">Contact number must be exactly 11 digits.</div>"
        ));
        assert!(html.contains("<option value=\"Female\" selected>Female</option>"));
        assert!(html.contains(&format!(
            "<option value=\"{0}\" selected>{0}</option>",
            COURSES[1]
        )));
    }

    #[test]
    fn test_unlisted_choice_is_echoed_as_selected_option() {
        let mut values = ana_form();
        values.gender = "Nonbinary".to_string();
        values.course = "<b>Astronomy</b>".to_string();

        let html = render(&View::Form {
            values,
            errors: FieldErrors::new(),
        });

        assert!(html.contains("<option value=\"Nonbinary\" selected>Nonbinary</option>"));
        assert!(html.contains(
            "<option value=\"&lt;b&gt;Astronomy&lt;/b&gt;\" selected>&lt;b&gt;Astronomy&lt;/b&gt;</option>"
        ));
        assert_eq!(html.matches(" selected>").count(), 2);
    }

    #[test]
    fn test_filtered_inputs_carry_filter_hooks() {
        let html = render(&View::blank_form());

        assert!(html.contains("name=\"firstname\" data-filter=\"name\""));
        assert!(html.contains("name=\"studentno\" data-filter=\"studentno\""));
        assert!(html.contains("name=\"contact\" data-filter=\"contact\""));
        assert!(html.contains("src=\"/assets/registration.js\""));
    }

    #[test]
    fn test_summary_renders_one_row_per_record() {
        let mut hostile = ana();
        hostile.address = "<b>Main</b> & 1st".to_string();

        let html = render(&View::Summary {
            records: vec![ana(), hostile],
        });

        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>Ana Lopez Cruz</td>"));
        assert!(html.contains("<td>&lt;b&gt;Main&lt;/b&gt; &amp; 1st</td>"));
        assert!(html.contains("name=\"home\""));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error("Bad Request", "unexpected field `<x>`");
        assert!(html.contains("unexpected field `&lt;x&gt;`"));
    }
}
