//! Alias list output.

/// One alias per line, no trailing newline.
pub fn render_alias_list<S: AsRef<str>>(aliases: &[S]) -> String {
    aliases
        .iter()
        .map(|alias| alias.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
}
