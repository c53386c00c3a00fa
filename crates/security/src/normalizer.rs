//! Legacy policy name aliases.

/// Legacy name for viewing a module.
pub const VIEW_MODULE: &str = "ViewModule";

/// Legacy name for editing a module.
pub const EDIT_MODULE: &str = "EditModule";

const ALIASES: [(&str, &str); 2] = [
    (VIEW_MODULE, "Module:View:Administrators:RequireEntityId"),
    (EDIT_MODULE, "Module:Edit:Administrators:RequireEntityId"),
];

/// Maps a legacy policy name to its canonical form. Other names pass through.
///
/// # Examples
///
/// ```
/// use meridian_security::normalize;
///
/// assert_eq!(normalize("ViewModule"), "Module:View:Administrators:RequireEntityId");
/// assert_eq!(normalize("Page:View:Registered Users"), "Page:View:Registered Users");
/// ```
pub fn normalize(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == name)
        .map_or(name, |(_, canonical)| *canonical)
}
