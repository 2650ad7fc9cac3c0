//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace ids in `path` with placeholders so each route is one label value.
pub(super) fn route_template(path: &str) -> String {
    let mut template = String::new();
    let mut previous = "";

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        template.push('/');

        if Uuid::parse_str(segment).is_ok() {
            template.push_str("{uuid}");
        } else if previous == "questions" {
            template.push_str("{question_id}");
        } else {
            template.push_str(segment);
        }

        previous = segment;
    }

    if template.is_empty() {
        template.push('/');
    }

    template
}
