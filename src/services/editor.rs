//! Slide editing operations.
//!
//! Edits are pure: they take the active slide and return the replacement
//! value, which the caller hands to `Deck::update`. Nothing here touches the
//! deck directly, so editing logic can be tested without the UI.

use std::path::{Path, PathBuf};

use crate::constants::slide::{MAX_EDIT_DURATION_SECS, MIN_EDIT_DURATION_SECS};
use crate::deck::{random_background, Slide};
use crate::error::{Error, Result};

/// Editable attribute of a slide, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    /// Headline text.
    #[default]
    Title,
    /// Body text.
    Content,
    /// Background image URI.
    Background,
    /// Display seconds.
    Duration,
    /// Color palette.
    Theme,
    /// Region arrangement.
    Layout,
}

impl EditField {
    /// Returns all fields in sidebar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Title,
            Self::Content,
            Self::Background,
            Self::Duration,
            Self::Theme,
            Self::Layout,
        ]
    }

    /// Sidebar label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Content => "Description",
            Self::Background => "Background Image",
            Self::Duration => "Duration (seconds)",
            Self::Theme => "Theme Color",
            Self::Layout => "Layout",
        }
    }

    /// Next field down, stopping at the last.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Content,
            Self::Content => Self::Background,
            Self::Background => Self::Duration,
            Self::Duration => Self::Theme,
            Self::Theme | Self::Layout => Self::Layout,
        }
    }

    /// Next field up, stopping at the first.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Title | Self::Content => Self::Title,
            Self::Background => Self::Content,
            Self::Duration => Self::Background,
            Self::Theme => Self::Duration,
            Self::Layout => Self::Theme,
        }
    }

    /// Whether the field takes free text.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Content | Self::Background)
    }
}

/// A single change to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Append a character to a text field.
    Insert(char),
    /// Append a string (paste) to a text field.
    InsertStr(String),
    /// Remove the last character of a text field.
    Backspace,
    /// Step a value field forward (longer duration, next theme or layout).
    Increase,
    /// Step a value field backward.
    Decrease,
    /// Replace the background with a fresh random image.
    RandomizeBackground,
    /// Replace the background with the given URI.
    SetBackground(String),
}

/// Result of an editor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// The slide changed; carries the new value.
    Modified(Slide),
    /// The edit applied but nothing changed.
    NoChange,
    /// The edit does not apply to this field.
    Unhandled,
}

/// Apply `edit` to `field` of `slide`.
pub fn apply_edit(slide: &Slide, field: EditField, edit: Edit) -> EditorAction {
    let mut next = slide.clone();

    match (field, edit) {
        (_, Edit::RandomizeBackground) => next.background_image = random_background(),
        (_, Edit::SetBackground(uri)) => next.background_image = uri,
        (EditField::Title | EditField::Content | EditField::Background, edit) => {
            let text = match field {
                EditField::Title => &mut next.title,
                EditField::Content => &mut next.content,
                _ => &mut next.background_image,
            };
            match edit {
                Edit::Insert(c) => text.push(c),
                Edit::InsertStr(s) => text.push_str(&sanitize_paste(&s, field)),
                Edit::Backspace => {
                    text.pop();
                }
                _ => return EditorAction::Unhandled,
            }
        }
        (EditField::Duration, Edit::Increase) => next.duration = step_duration(slide.duration, 1),
        (EditField::Duration, Edit::Decrease) => next.duration = step_duration(slide.duration, -1),
        (EditField::Theme, Edit::Increase) => next.theme = slide.theme.next(),
        (EditField::Theme, Edit::Decrease) => next.theme = slide.theme.previous(),
        (EditField::Layout, Edit::Increase) => next.layout = slide.layout.next(),
        (EditField::Layout, Edit::Decrease) => next.layout = slide.layout.previous(),
        _ => return EditorAction::Unhandled,
    }

    if &next == slide {
        EditorAction::NoChange
    } else {
        EditorAction::Modified(next)
    }
}

/// Clamp a duration to the range the editor offers.
pub fn clamp_edit_duration(secs: i64) -> u32 {
    let clamped = secs.clamp(i64::from(MIN_EDIT_DURATION_SECS), i64::from(MAX_EDIT_DURATION_SECS));
    u32::try_from(clamped).unwrap_or(MIN_EDIT_DURATION_SECS)
}

fn step_duration(current: u32, delta: i64) -> u32 {
    clamp_edit_duration(i64::from(current) + delta)
}

/// Single-line fields drop newlines from pasted text.
fn sanitize_paste(text: &str, field: EditField) -> String {
    if field == EditField::Content {
        text.replace("\r\n", "\n")
    } else {
        text.split_whitespace().collect::<Vec<_>>().join(if field == EditField::Background { "" } else { " " })
    }
}

/// Read a local image and encode it as a self-contained `data:` URI.
///
/// `~` is expanded. The MIME type comes from the file extension.
pub fn import_image(raw_path: &str) -> Result<String> {
    let trimmed = raw_path.trim();
    if trimmed.is_empty() {
        return Err(Error::Msg("No file path given".to_string()));
    }
    let path = PathBuf::from(shellexpand::tilde(trimmed).to_string());
    let bytes = fs_err::read(&path).map_err(|e| Error::io(e, Some(path.clone())))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "imported background image");
    Ok(format!("data:{};base64,{}", mime_for_path(&path), base64::encode(bytes)))
}

/// MIME type guessed from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::{Layout, Theme};
    use std::io::Write;

    fn modified(action: EditorAction) -> Slide {
        match action {
            EditorAction::Modified(slide) => slide,
            other => panic!("expected a modification, got {other:?}"),
        }
    }

    #[test]
    fn typing_appends_to_text_fields() {
        let slide = Slide::blank();
        let s = modified(apply_edit(&slide, EditField::Title, Edit::Insert('!')));
        assert_eq!(s.title, "New Slide!");
        let s = modified(apply_edit(&s, EditField::Title, Edit::Backspace));
        assert_eq!(s.title, "New Slide");
        assert_eq!(s.id, slide.id);
    }

    #[test]
    fn backspace_on_empty_text_is_no_change() {
        let mut slide = Slide::blank();
        slide.content.clear();
        assert_eq!(
            apply_edit(&slide, EditField::Content, Edit::Backspace),
            EditorAction::NoChange
        );
    }

    #[test]
    fn paste_flattens_single_line_fields() {
        let slide = Slide { title: String::new(), ..Slide::blank() };
        let s = modified(apply_edit(
            &slide,
            EditField::Title,
            Edit::InsertStr("Lunch\nSpecials".into()),
        ));
        assert_eq!(s.title, "Lunch Specials");

        let s = modified(apply_edit(
            &slide,
            EditField::Content,
            Edit::InsertStr("a\r\nb".into()),
        ));
        assert!(s.content.ends_with("a\nb"));
    }

    #[test]
    fn duration_steps_are_clamped_to_editor_range() {
        let mut slide = Slide::blank();
        slide.duration = 60;
        assert_eq!(
            apply_edit(&slide, EditField::Duration, Edit::Increase),
            EditorAction::NoChange
        );
        slide.duration = 3;
        assert_eq!(
            apply_edit(&slide, EditField::Duration, Edit::Decrease),
            EditorAction::NoChange
        );
        slide.duration = 10;
        assert_eq!(modified(apply_edit(&slide, EditField::Duration, Edit::Increase)).duration, 11);
    }

    #[test]
    fn out_of_range_duration_is_pulled_into_range_on_edit() {
        let mut slide = Slide::blank();
        slide.duration = 600;
        assert_eq!(modified(apply_edit(&slide, EditField::Duration, Edit::Decrease)).duration, 60);
        assert_eq!(clamp_edit_duration(-5), 3);
    }

    #[test]
    fn theme_and_layout_cycle() {
        let slide = Slide::blank();
        assert_eq!(modified(apply_edit(&slide, EditField::Theme, Edit::Increase)).theme, Theme::Light);
        assert_eq!(modified(apply_edit(&slide, EditField::Theme, Edit::Decrease)).theme, Theme::Green);
        assert_eq!(
            modified(apply_edit(&slide, EditField::Layout, Edit::Increase)).layout,
            Layout::SplitLeft
        );
    }

    #[test]
    fn typing_into_value_field_is_unhandled() {
        let slide = Slide::blank();
        assert_eq!(
            apply_edit(&slide, EditField::Theme, Edit::Insert('x')),
            EditorAction::Unhandled
        );
        assert_eq!(
            apply_edit(&slide, EditField::Title, Edit::Increase),
            EditorAction::Unhandled
        );
    }

    #[test]
    fn randomize_replaces_background() {
        let slide = Slide::blank();
        let s = modified(apply_edit(&slide, EditField::Background, Edit::RandomizeBackground));
        assert!(s.background_image.starts_with("https://picsum.photos/seed/"));
        assert_ne!(s.background_image, slide.background_image);
    }

    #[test]
    fn field_focus_stops_at_edges() {
        assert_eq!(EditField::Title.previous(), EditField::Title);
        assert_eq!(EditField::Layout.next(), EditField::Layout);
        let mut f = EditField::Title;
        for _ in 1..EditField::all().len() {
            f = f.next();
        }
        assert_eq!(f, EditField::Layout);
    }

    #[test]
    fn imports_file_as_data_uri() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        let uri = import_image(file.path().to_str().unwrap()).unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = import_image("/definitely/not/here.jpg").unwrap_err();
        match err {
            Error::Io { path: Some(p), .. } => assert!(p.ends_with("here.jpg")),
            other => panic!("expected Io error, got {other:?}"),
        }
        assert!(import_image("   ").is_err());
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(mime_for_path(Path::new("a.tiff")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("a.jpeg")), "image/jpeg");
    }
}
