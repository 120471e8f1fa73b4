// Content-page documents shaped like the app's info pages

/// Page with a verse, a dua in running text, and a transliterated term
pub const PRAYER_PAGE: &str = r#"{
  "id": "prayer",
  "title": "Prayer",
  "sections": [
    {
      "type": "heading",
      "text": "Opening"
    },
    {
      "type": "paragraph",
      "text": "﴿قُلْ هُوَ اللَّهُ أَحَدٌ﴾ Say: He is Allah, the One."
    },
    {
      "type": "paragraph",
      "text": "Recite: اللهم اغفر لي in your duas"
    },
    {
      "type": "paragraph",
      "text": "Ṣalāh is the second pillar after the Shahādah."
    },
    {
      "type": "list",
      "items": [
        "Face the Qiblah",
        "Say: الله أكبر",
        "Recite Sūrat al-Fātiḥah"
      ]
    }
  ]
}"#;

/// Page with nothing to annotate
pub const PLAIN_PAGE: &str = r#"{"title":"Charity","sections":[{"type":"paragraph","text":"Give what you can."}]}"#;

/// Page whose root has no sections array
pub const MISSING_SECTIONS_PAGE: &str = r#"{"title": "Broken"}"#;
