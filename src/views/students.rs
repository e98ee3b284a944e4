// Student list, detail and form pages

use std::fmt::Write;

use super::{escape_html, layout};
use crate::model::{Grade, Student, StudentId, StudentInput, ValidationErrors, MAX_AGE, MIN_AGE};

fn grade_label(student: &Student) -> &'static str {
    student.grade.map_or("-", Grade::as_str)
}

pub fn list_page(students: &[Student]) -> String {
    let mut content = String::from("        <h1>Students</h1>\n");

    if students.is_empty() {
        content.push_str(
            "        <p class=\"muted\">No students yet.</p>\n",
        );
    } else {
        content.push_str(
            "        <table>\n            <tr><th>Name</th><th>Age</th><th>Grade</th><th></th></tr>\n",
        );
        for student in students {
            let _ = writeln!(
                content,
                r#"            <tr><td><a href="/students/{id}">{name}</a></td><td>{age}</td><td>{grade}</td><td><a href="/students/{id}/edit">Edit</a></td></tr>"#,
                id = student.id,
                name = escape_html(&student.name),
                age = student.age,
                grade = grade_label(student),
            );
        }
        content.push_str("        </table>\n");
    }

    content.push_str(r#"        <a class="button" href="/students/add">Add student</a>"#);
    layout("Students", &content)
}

pub fn detail_page(student: &Student) -> String {
    let content = format!(
        r#"        <h1>{name}</h1>
        <table>
            <tr><th>Id</th><td>{id}</td></tr>
            <tr><th>Age</th><td>{age}</td></tr>
            <tr><th>Grade</th><td>{grade}</td></tr>
        </table>
        <a class="button" href="/students/{id}/edit">Edit</a>
        <a class="button" href="/students/{id}/delete">Delete</a>
        <a class="button" href="/students">Back</a>"#,
        name = escape_html(&student.name),
        id = student.id,
        age = student.age,
        grade = grade_label(student),
    );
    layout(&student.name, &content)
}

/// Whether the form creates a new student or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(StudentId),
}

impl FormMode {
    fn action(self) -> String {
        match self {
            Self::Add => "/students".to_string(),
            Self::Edit(id) => format!("/students/{id}"),
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Add => "Add student",
            Self::Edit(_) => "Edit student",
        }
    }

    fn cancel_href(self) -> String {
        match self {
            Self::Add => "/students".to_string(),
            Self::Edit(id) => format!("/students/{id}"),
        }
    }
}

/// Render the add/edit form, pre-filled with `values` and listing `errors`
pub fn form_page(mode: FormMode, values: &StudentInput, errors: Option<&ValidationErrors>) -> String {
    let mut content = format!("        <h1>{}</h1>\n", mode.title());

    if let Some(errors) = errors.filter(|e| !e.is_empty()) {
        content.push_str("        <ul class=\"errors\">\n");
        for error in errors.iter() {
            let _ = writeln!(content, "            <li>{}</li>", escape_html(&error.message));
        }
        content.push_str("        </ul>\n");
    }

    let invalid = |field: &str| {
        if errors.is_some_and(|e| e.has(field)) {
            r#" aria-invalid="true""#
        } else {
            ""
        }
    };
    let name = values.name.as_deref().unwrap_or_default();
    let age = values.age.as_ref().map(ToString::to_string).unwrap_or_default();
    let selected = values.grade.as_deref().unwrap_or_default().trim();

    let mut options = String::from(r#"                <option value="">No grade</option>"#);
    for grade in Grade::ALL {
        let label = grade.as_str();
        let attr = if label == selected { " selected" } else { "" };
        let _ = write!(
            options,
            "\n                <option value=\"{label}\"{attr}>{label}</option>"
        );
    }

    let _ = write!(
        content,
        r#"        <form method="post" action="{action}">
            <label for="name">Name</label>
            <input id="name" name="name" type="text" value="{name}"{name_invalid} required>
            <label for="age">Age</label>
            <input id="age" name="age" type="number" min="{MIN_AGE}" max="{MAX_AGE}" value="{age}"{age_invalid} required>
            <label for="grade">Grade</label>
            <select id="grade" name="grade"{grade_invalid}>
{options}
            </select>
            <button type="submit">Save</button>
            <a class="button" href="{cancel}">Cancel</a>
        </form>"#,
        action = mode.action(),
        name = escape_html(name),
        age = escape_html(&age),
        cancel = mode.cancel_href(),
        name_invalid = invalid("name"),
        age_invalid = invalid("age"),
        grade_invalid = invalid("grade"),
    );

    layout(mode.title(), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AgeValue, NewStudent};

    fn student(name: &str, grade: Option<Grade>) -> Student {
        Student::new(
            StudentId::generate(),
            NewStudent {
                name: name.to_string(),
                age: 12,
                grade,
            },
        )
    }

    #[test]
    fn test_list_page_rows_and_links() {
        let alice = student("Alice", Some(Grade::A));
        let html = list_page(&[alice.clone(), student("Bob", None)]);
        assert!(html.contains(&format!(r#"<a href="/students/{}">Alice</a>"#, alice.id)));
        assert!(html.contains("<td>A</td>"));
        assert!(html.contains("<td>-</td>"));
    }

    #[test]
    fn test_list_page_empty() {
        assert!(list_page(&[]).contains("No students yet."));
    }

    #[test]
    fn test_detail_page_escapes_name() {
        let html = detail_page(&student("<script>", None));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_edit_form_prefilled() {
        let s = student("Cleo", Some(Grade::BPlus));
        let html = form_page(FormMode::Edit(s.id), &StudentInput::from(&s), None);
        assert!(html.contains(&format!(r#"action="/students/{}""#, s.id)));
        assert!(html.contains(r#"value="Cleo""#));
        assert!(html.contains(r#"value="12""#));
        assert!(html.contains(r#"<option value="B+" selected>B+</option>"#));
    }

    #[test]
    fn test_add_form_shows_errors_and_values() {
        let values = StudentInput {
            name: Some("Bob".into()),
            age: Some(AgeValue::Text("25".into())),
            grade: None,
        };
        let errors = values.validate().unwrap_err();
        let html = form_page(FormMode::Add, &values, Some(&errors));
        assert!(html.contains(r#"action="/students""#));
        assert!(html.contains("age must be between 9 and 18"));
        assert!(html.contains(r#"value="25" aria-invalid="true""#));
        assert!(html.contains(r#"value="Bob" required"#));
    }
}
