//! Integration tests for payload assembly.

use chrono::NaiveDate;
use paperwork::{
    assemble, validate_at, AttachedFile, DocumentEntry, FormRecord, PayloadValue, ValidRecord,
    ValidationContext,
};

fn ctx() -> ValidationContext {
    ValidationContext::at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

fn record(same_as_residential: bool) -> FormRecord {
    FormRecord {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@navy.example".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1986, 12, 9),
        same_as_residential,
        residential_line1: "Street three".into(),
        residential_line2: "Arlington".into(),
        permanent_line1: "Street four".into(),
        permanent_line2: "New York".into(),
        documents: vec![
            DocumentEntry::new(
                "Passport",
                "application/pdf",
                Some(AttachedFile::new("passport.pdf", "application/pdf", b"%PDF-1.7".to_vec())),
            ),
            DocumentEntry::new(
                "Photo",
                "image/png",
                Some(AttachedFile::new("me.PNG", "image/png", vec![0x89, b'P', b'N', b'G'])),
            ),
        ]
        .into_iter()
        .collect(),
        ..FormRecord::default()
    }
}

fn valid(same_as_residential: bool) -> ValidRecord {
    validate_at(&record(same_as_residential), &ctx()).unwrap()
}

fn text<'a>(value: Option<&'a PayloadValue>) -> Option<&'a str> {
    value.and_then(PayloadValue::as_text)
}

#[test]
fn test_text_fields() {
    let payload = assemble(&valid(true));

    assert_eq!(text(payload.get("name")), Some("Grace Hopper"));
    assert_eq!(text(payload.get("dob")), Some("1986-12-09T00:00:00.000Z"));
    assert_eq!(text(payload.get("email")), Some("grace@navy.example"));
    assert_eq!(text(payload.get("residentialAddress")), Some("Street three Arlington"));
    assert_eq!(text(payload.get("sameAsResidential")), Some("true"));
}

#[test]
fn test_permanent_address_omitted_when_same() {
    let payload = assemble(&valid(true));
    assert!(!payload.contains_key("permanentAddress"));
    assert!(payload.keys().all(|k| k != "permanentAddress"));
}

#[test]
fn test_permanent_address_present_when_different() {
    let payload = assemble(&valid(false));
    assert_eq!(text(payload.get("sameAsResidential")), Some("false"));
    assert_eq!(
        text(payload.get("permanentAddress")),
        Some("Street four New York")
    );
}

#[test]
fn test_key_order_and_repeated_document_keys() {
    let payload = assemble(&valid(false));
    let keys: Vec<_> = payload.keys().collect();
    assert_eq!(
        keys,
        vec![
            "name",
            "dob",
            "email",
            "residentialAddress",
            "sameAsResidential",
            "permanentAddress",
            "documentsFileName",
            "documentsFileType",
            "documents",
            "documentsFileName",
            "documentsFileType",
            "documents",
        ]
    );

    let names: Vec<_> = payload
        .get_all("documentsFileName")
        .filter_map(PayloadValue::as_text)
        .collect();
    assert_eq!(names, vec!["Passport", "Photo"]);

    let types: Vec<_> = payload
        .get_all("documentsFileType")
        .filter_map(PayloadValue::as_text)
        .collect();
    assert_eq!(types, vec!["application/pdf", "image/png"]);
}

#[test]
fn test_file_parts_carry_reported_name_and_mime() {
    let payload = assemble(&valid(true));
    let files: Vec<_> = payload
        .get_all("documents")
        .filter_map(PayloadValue::as_file)
        .collect();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_name, "passport.pdf");
    assert_eq!(files[0].mime_type, "application/pdf");
    assert_eq!(&files[0].bytes[..], b"%PDF-1.7");
    assert_eq!(files[1].file_name, "me.PNG");
}
