use crate::espeak::parse_espeak_voices;
use crate::sapi::{parse_sapi_voices, ps_quote, wpm_to_sapi_rate};
use crate::say::parse_say_voices;

const SAY_SAMPLE: &str = "\
Alex                en_US    # Most people recognize me by my voice.
Bad News            en_US    # The light you see at the end of the tunnel is the headlamp of a fast approaching train.
Daniel              en_GB    # Hello, my name is Daniel. I am a British-English voice.
Samantha            en_US    # Hello, my name is Samantha. I am an American-English voice.
Ting-Ting           zh_CN    # \u{4f60}\u{597d}\u{ff0c}\u{6211}\u{53eb}Ting-Ting\u{3002}
";

const ESPEAK_SAMPLE: &str = "\
Pty Language Age/Gender VoiceName          File          Other Languages
 5  af             M  afrikaans            other/af
 5  en             M  english              default
 2  en-gb          M  english              en            (en 2)
 5  en-us          M  english-us           en-us         (en-r 5)(en 3)
";

#[test]
fn say_voices_parse_names_and_locales() {
    let voices = parse_say_voices(SAY_SAMPLE);
    let ids: Vec<&str> = voices.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["Alex", "Bad News", "Daniel", "Samantha", "Ting-Ting"]
    );
    assert_eq!(voices[0].language.as_deref(), Some("en_US"));
    assert_eq!(voices[2].language.as_deref(), Some("en_GB"));
}

#[test]
fn say_voices_without_sample_sentence_still_parse() {
    let voices = parse_say_voices("Fred en_US\n\n");
    assert_eq!(voices.len(), 1);
    assert_eq!(voices[0].id, "Fred");
    assert_eq!(voices[0].language.as_deref(), Some("en_US"));
}

#[test]
fn say_voice_names_keep_internal_spaces() {
    let voices = parse_say_voices("Good News          en_US    # Congratulations!\n");
    assert_eq!(voices[0].id, "Good News");
    assert_eq!(voices[0].name, "Good News");
}

#[test]
fn espeak_voices_parse_ids_and_languages() {
    let voices = parse_espeak_voices(ESPEAK_SAMPLE);
    assert_eq!(voices.len(), 4);
    assert_eq!(voices[0].id, "afrikaans");
    assert_eq!(voices[0].language.as_deref(), Some("af"));
    assert_eq!(voices[3].id, "english-us");
    assert_eq!(voices[3].language.as_deref(), Some("en-us"));
}

#[test]
fn espeak_header_line_is_skipped() {
    let voices = parse_espeak_voices("Pty Language Age/Gender VoiceName File Other\n");
    assert!(voices.is_empty());
}

#[test]
fn sapi_voices_parse_names_and_cultures() {
    let voices = parse_sapi_voices(
        "Microsoft Zira Desktop|en-US\r\nMicrosoft David Desktop|en-US\r\n\r\nLegacyVoice\n",
    );
    assert_eq!(voices.len(), 3);
    assert_eq!(voices[0].id, "Microsoft Zira Desktop");
    assert_eq!(voices[0].language.as_deref(), Some("en-US"));
    assert_eq!(voices[2].id, "LegacyVoice");
    assert_eq!(voices[2].language, None);
}

#[test]
fn sapi_rate_mapping_is_anchored_and_clamped() {
    assert_eq!(wpm_to_sapi_rate(170), 0);
    assert_eq!(wpm_to_sapi_rate(80), -4);
    assert_eq!(wpm_to_sapi_rate(400), 10);
    assert_eq!(wpm_to_sapi_rate(1000), 10);
    assert_eq!(wpm_to_sapi_rate(1), -8);
}

#[test]
fn powershell_single_quotes_are_doubled() {
    assert_eq!(ps_quote("it's a test"), "it''s a test");
    assert_eq!(ps_quote("plain"), "plain");
}
