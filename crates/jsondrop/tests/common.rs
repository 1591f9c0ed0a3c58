#![allow(dead_code)]

/// A pretty-printed consent record, indented the way editors usually leave
/// it. Non-canonical numbers (`2.0`, `1e3`) must survive every edit.
pub const ORIGINAL: &str = r#"{
    "consent": "TESTCONSENT",
    "consented_providers_settings": {
        "consented_providers": [1608, 765, 492],
        "test": 1
    },
    "version": 2.0,
    "vendors": [
        {"id": 1, "purposes": {"ads": true}},
        {"id": 2, "purposes": {}}
    ],
    "limits": {"max": 1e3, "label": "a \"quoted\" {brace}"},
    "empty": {},
    "trailing": {
        "status": "ok"
    }
}
"#;

/// `ORIGINAL` with the first occurrence of `fragment` cut out.
pub fn without(fragment: &str) -> String {
    assert!(
        ORIGINAL.contains(fragment),
        "fixture does not contain {fragment:?}"
    );
    ORIGINAL.replacen(fragment, "", 1)
}

pub fn text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).expect("output stays UTF-8")
}
