use strum::{AsRefStr, Display, EnumIter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
    Es,
    Fr,
    Ja,
}

impl Locale {
    /// Accepts tags like `fr`, `fr-CA` or `pt_BR`; unknown languages map to English.
    pub fn parse(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match lang.as_str() {
            "de" => Locale::De,
            "es" => Locale::Es,
            "fr" => Locale::Fr,
            "ja" => Locale::Ja,
            _ => Locale::En,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, EnumIter)]
pub enum MessageKey {
    #[strum(serialize = "account_note.placeholder")]
    Placeholder,
    #[strum(serialize = "account.account_note_header")]
    NoteHeader,
    #[strum(serialize = "generic.saved")]
    Saved,
}

pub fn t(locale: Locale, key: MessageKey) -> &'static str {
    use Locale::*;
    use MessageKey::*;

    match (locale, key) {
        (En, Placeholder) => "Click to add a note",
        (En, NoteHeader) => "Note",
        (En, Saved) => "Saved",

        (De, Placeholder) => "Klicken, um Notiz hinzuzufügen",
        (De, NoteHeader) => "Notiz",
        (De, Saved) => "Gespeichert",

        (Es, Placeholder) => "Haz clic para añadir una nota",
        (Es, NoteHeader) => "Nota",
        (Es, Saved) => "Guardado",

        (Fr, Placeholder) => "Cliquez pour ajouter une note",
        (Fr, NoteHeader) => "Note",
        (Fr, Saved) => "Sauvegardé",

        (Ja, Placeholder) => "クリックしてメモを追加",
        (Ja, NoteHeader) => "メモ",
        (Ja, Saved) => "保存しました",
    }
}
