//! Property-based tests for the document model.

use super::IniDocument;
use proptest::prelude::*;

type Sections = Vec<(String, Vec<(String, String)>)>;

// Distinct section names, each with distinct lower-case option names.
fn sections_strategy() -> impl Strategy<Value = Sections> {
    prop::collection::btree_map(
        "[a-z][a-z0-9_]{0,8}",
        prop::collection::btree_map("[a-z][a-z0-9_]{0,8}", "[A-Za-z0-9./:=-]{0,12}", 0..5),
        0..5,
    )
    .prop_map(|sections| {
        sections
            .into_iter()
            .map(|(name, options)| (name, options.into_iter().collect()))
            .collect()
    })
}

fn render(sections: &Sections) -> String {
    let mut text = String::new();
    for (name, options) in sections {
        text.push_str(&format!("[{name}]\n"));
        for (option, value) in options {
            text.push_str(&format!("{option} = {value}\n"));
        }
        text.push('\n');
    }
    text
}

fn snapshot(doc: &IniDocument) -> Vec<(String, Vec<(String, String)>)> {
    doc.sections()
        .map(|name| {
            let options = doc
                .options(name)
                .unwrap_or_default()
                .into_iter()
                .map(|(o, v)| (o.to_string(), v.to_string()))
                .collect();
            (name.to_string(), options)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // Rendering an untouched document reproduces its text exactly.
    #[test]
    fn untouched_document_renders_verbatim(sections in sections_strategy()) {
        let text = render(&sections);
        let doc = IniDocument::parse(&text).unwrap();
        prop_assert_eq!(doc.to_string(), text);
    }

    // Serialise-then-reparse keeps every section and option.
    #[test]
    fn reparse_preserves_content(sections in sections_strategy()) {
        let doc = IniDocument::parse(&render(&sections)).unwrap();
        let reparsed = IniDocument::parse(&doc.to_string()).unwrap();
        prop_assert_eq!(snapshot(&reparsed), sections);
    }

    // Setting a value is visible afterwards, whether or not the section
    // and option existed before, and nothing else changes.
    #[test]
    fn set_is_visible_and_local(
        sections in sections_strategy(),
        section in "[a-z][a-z0-9_]{0,8}",
        option in "[a-z][a-z0-9_]{0,8}",
        value in "[A-Za-z0-9./:=-]{0,12}",
    ) {
        let mut doc = IniDocument::parse(&render(&sections)).unwrap();
        doc.set(&section, &option, &value);
        prop_assert_eq!(doc.get(&section, &option), Some(value.as_str()));

        let reparsed = IniDocument::parse(&doc.to_string()).unwrap();
        prop_assert_eq!(reparsed.get(&section, &option), Some(value.as_str()));
        for (name, options) in &sections {
            for (o, v) in options {
                if name != &section || o != &option {
                    prop_assert_eq!(reparsed.get(name, o), Some(v.as_str()));
                }
            }
        }
    }

    // Applying the same set twice leaves the same document as applying it once.
    #[test]
    fn set_is_idempotent(
        sections in sections_strategy(),
        section in "[a-z][a-z0-9_]{0,8}",
        option in "[a-z][a-z0-9_]{0,8}",
        value in "[A-Za-z0-9./:=-]{0,12}",
    ) {
        let mut once = IniDocument::parse(&render(&sections)).unwrap();
        once.set(&section, &option, &value);
        let mut twice = once.clone();
        let previous = twice.set(&section, &option, &value);
        prop_assert_eq!(previous, Some(value.clone()));
        prop_assert_eq!(once.to_string(), twice.to_string());
    }

    // Removing a section removes every one of its options and nothing else.
    #[test]
    fn remove_section_is_complete(sections in sections_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!sections.is_empty());
        let (victim, options) = &sections[pick.index(sections.len())];
        let mut doc = IniDocument::parse(&render(&sections)).unwrap();
        prop_assert_eq!(doc.remove_section(victim), Some(options.len()));
        prop_assert!(!doc.has_section(victim));
        for (o, _) in options {
            prop_assert_eq!(doc.get(victim, o), None);
        }
        let reparsed = IniDocument::parse(&doc.to_string()).unwrap();
        prop_assert_eq!(reparsed.sections().count(), sections.len() - 1);
    }
}
