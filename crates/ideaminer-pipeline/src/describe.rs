//! Privacy-friendly names for source files in log output

/// Describe a source file without revealing who it is with
///
/// Phone numbers, email addresses and contact names stay out of the logs.
///
/// | Filename                         | Description                             |
/// |----------------------------------|-----------------------------------------|
/// | `export.json`                    | a Skype conversation                    |
/// | `+15551234567.html`              | a direct message                        |
/// | `+15551234567, +15557654321.html`| a group message with 2 people           |
/// | `Book Club - 2024.html`          | the "Book Club" chat                    |
/// | `dana@example.com.html`          | a conversation with an email contact    |
/// | anything else                    | the filename itself                     |
pub fn describe_source(filename: &str) -> String {
    if filename.ends_with(".json") {
        return "a Skype conversation".to_string();
    }

    if filename.contains('+') {
        let people = filename.split(',').count();
        return if people > 1 {
            format!("a group message with {} people", people)
        } else {
            "a direct message".to_string()
        };
    }

    if let Some((chat_name, _)) = filename.split_once(" - ") {
        return format!("the \"{}\" chat", chat_name);
    }

    if filename.contains('@') {
        return "a conversation with an email contact".to_string();
    }

    filename.to_string()
}
