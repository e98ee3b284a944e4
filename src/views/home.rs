// Landing page

use super::layout;

pub fn home_page() -> String {
    layout(
        "Home",
        r#"        <h1>Study List</h1>
        <p>Keep track of your students, their ages and their grades.</p>
        <a class="button" href="/students">View students</a>
        <a class="button" href="/students/add">Add a student</a>"#,
    )
}
