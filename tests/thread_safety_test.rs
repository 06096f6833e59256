//! Tests for sharing a built rule set and notifier across threads.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use paperwork::{
    AttachedFile, BufferedNotifier, DocumentEntry, FormRecord, FormValidator, Notifier,
    ValidationContext,
};

fn record(i: usize) -> FormRecord {
    FormRecord {
        first_name: format!("User{}", i),
        last_name: "Tester".into(),
        email: format!("user{}@example.com", i),
        date_of_birth: NaiveDate::from_ymd_opt(1980 + i as i32, 1, 1),
        same_as_residential: true,
        residential_line1: "1 Main St".into(),
        residential_line2: "Springfield".into(),
        documents: vec![DocumentEntry::new(
            "Scan",
            "image/webp",
            Some(AttachedFile::new("scan.webp", "image/webp", vec![1, 2, 3])),
        )]
        .into_iter()
        .collect(),
        ..FormRecord::default()
    }
}

#[test]
fn test_concurrent_validation() {
    let validator = Arc::new(FormValidator::default());
    let ctx = ValidationContext::at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let valid = validator.validate(&record(i), &ctx).unwrap();
                assert_eq!(valid.first_name(), format!("User{}", i));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let validator = Arc::new(FormValidator::default());
    let ctx = ValidationContext::at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let mut record = record(i);
                record.email = String::new();
                let errors = validator.validate(&record, &ctx).unwrap_err();
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.first().path.to_string(), "email");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_notifications() {
    let notifier = Arc::new(BufferedNotifier::new());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let notifier = Arc::clone(&notifier);
            thread::spawn(move || {
                if i % 2 == 0 {
                    notifier.notify_success("ok");
                } else {
                    notifier.notify_failure("failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let drained = notifier.drain();
    assert_eq!(drained.len(), 10);
    assert_eq!(drained.iter().filter(|n| n.is_success()).count(), 5);
}
