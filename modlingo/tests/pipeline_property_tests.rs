use modlingo::placeholder::{Span, placeholders_preserved, tokenize};
use modlingo::types::{Entry, Metadata, Resource};
use modlingo::{Lexicon, Translator, has_target_script, is_visible, translate_resource};
use proptest::prelude::*;

fn markup_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<font color='#FF0000'>".to_string()),
        Just("<Alias=Player>".to_string()),
        Just("%s".to_string()),
        Just("%2$s".to_string()),
        Just("{0}".to_string()),
        Just("&amp;".to_string()),
        Just("\\n".to_string()),
        Just("[pagebreak]".to_string()),
    ]
}

fn prose_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("I have found ".to_string()),
        Just("Please find the key".to_string()),
        Just("Go to Winterhold".to_string()),
        Just(" ".to_string()),
        Just(". ".to_string()),
        proptest::string::string_regex("[A-Za-z ,.!?']{1,20}").expect("valid prose regex"),
    ]
}

fn mixed_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![markup_strategy(), prose_strategy()], 0..10)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_spans_reconstruct_input(input in any::<String>()) {
        let joined: String = tokenize(&input).iter().map(Span::as_str).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn prop_spans_reconstruct_markup_text(input in mixed_text_strategy()) {
        let spans = tokenize(&input);
        prop_assert!(spans.iter().all(|s| !s.as_str().is_empty()));
        let joined: String = spans.iter().map(Span::as_str).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn prop_translation_preserves_placeholders(input in mixed_text_strategy()) {
        let lexicon = Lexicon::builtin();
        let translated = Translator::new(&lexicon).translate(&input);
        prop_assert!(placeholders_preserved(&input, &translated));
    }

    #[test]
    fn prop_empty_lexicon_is_identity(input in mixed_text_strategy()) {
        let lexicon = Lexicon::empty();
        prop_assert_eq!(Translator::new(&lexicon).translate(&input), input);
    }

    #[test]
    fn prop_visibility_is_pure(
        source in any::<String>(),
        record_type in prop_oneof![Just("GMST".to_string()), Just("INFO:NAM1".to_string()), any::<String>()],
        editor_id in any::<String>(),
    ) {
        let first = is_visible(&source, &record_type, &editor_id);
        let second = is_visible(&source, &record_type, &editor_id);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_source_never_mutated_and_translated_dest_untouched(
        sources in prop::collection::vec(mixed_text_strategy(), 0..8),
    ) {
        let entries: Vec<Entry> = sources
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let entry = Entry::new(s.clone()).with_record_type("INFO:NAM1");
                if i % 2 == 0 { entry.with_dest("Уже переведено") } else { entry }
            })
            .collect();
        let mut resource = Resource { metadata: Metadata::default(), entries: entries.clone() };

        let counts = translate_resource(&mut resource, &Lexicon::builtin());

        prop_assert!(counts.changed <= counts.visible);
        for (before, after) in entries.iter().zip(&resource.entries) {
            prop_assert_eq!(&after.source, &before.source);
            if has_target_script(&before.dest) {
                prop_assert_eq!(&after.dest, &before.dest);
            }
        }
    }
}
