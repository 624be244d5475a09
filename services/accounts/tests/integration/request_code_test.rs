use std::time::Duration;

use chrono::Duration as ChronoDuration;

use elevate_accounts::domain::repository::AccountDirectory;
use elevate_accounts::error::AccountsServiceError;
use elevate_accounts::usecase::otp::{
    DEFAULT_DELIVERY_TIMEOUT, RequestCodeInput, RequestCodeUseCase, ResetPasswordInput,
    ResetPasswordUseCase,
};

use crate::helpers::{
    Delivery, MockAccountDirectory, MockCodeRepo, MockNotifier, alice, directory_and_codes,
    password_of, t0,
};

fn request_code_usecase(
    directory: MockAccountDirectory,
    codes: MockCodeRepo,
    notifier: MockNotifier,
) -> RequestCodeUseCase<MockAccountDirectory, MockCodeRepo, MockNotifier> {
    RequestCodeUseCase {
        accounts: directory,
        codes,
        notifier,
        delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
    }
}

#[tokio::test]
async fn should_issue_code_and_notify_owner() {
    let (directory, codes) = directory_and_codes();
    let codes_handle = codes.codes_handle();
    let notifier = MockNotifier::accepting();
    let sent = notifier.sent_handle();

    let out = request_code_usecase(directory, codes, notifier)
        .execute_at(
            RequestCodeInput {
                email: alice().email,
            },
            t0(),
        )
        .await
        .unwrap();

    assert!(out.delivered);
    assert_eq!(out.email, alice().email);
    assert_eq!(out.message(), "OTP sent successfully");
    assert_eq!(out.expires_at, t0() + ChronoDuration::minutes(10));

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "expected exactly one code to be created");
    let created = &codes[0];
    assert_eq!(created.account_id, alice().id);
    assert_eq!(created.code.len(), 6);
    assert!(created.code.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(created.created_at, t0());
    assert!(created.used_at.is_none(), "new code should not be used");

    let sent = sent.lock().unwrap();
    assert_eq!(sent.as_slice(), &[(alice().email, created.code.clone())]);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_email() {
    let (directory, codes) = directory_and_codes();
    let codes_handle = codes.codes_handle();
    let notifier = MockNotifier::accepting();
    let sent = notifier.sent_handle();

    let result = request_code_usecase(directory, codes, notifier)
        .execute(RequestCodeInput {
            email: "ghost@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AccountsServiceError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );
    assert!(codes_handle.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_email_before_lookup() {
    let directory = MockAccountDirectory::empty();
    let codes = MockCodeRepo::new(directory.passwords_handle());

    let result = request_code_usecase(directory, codes, MockNotifier::accepting())
        .execute(RequestCodeInput {
            email: "not-an-email".to_owned(),
        })
        .await;

    assert!(
        matches!(
            result,
            Err(AccountsServiceError::Validation { field: "email", .. })
        ),
        "expected email validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_code_usable_when_delivery_fails() {
    let (directory, codes) = directory_and_codes();
    let passwords = directory.passwords_handle();
    let codes_handle = codes.codes_handle();

    let out = request_code_usecase(
        directory.clone(),
        codes.clone(),
        MockNotifier::new(Delivery::Reject),
    )
    .execute_at(
        RequestCodeInput {
            email: alice().email,
        },
        t0(),
    )
    .await
    .unwrap();

    assert!(!out.delivered);
    assert_eq!(out.message(), "Failed to send OTP");

    let issued = codes_handle.lock().unwrap()[0].code.clone();
    ResetPasswordUseCase {
        accounts: directory,
        codes,
    }
    .execute_at(
        ResetPasswordInput {
            email: alice().email,
            code: issued,
            new_password: "NewPass1".to_owned(),
        },
        t0() + ChronoDuration::minutes(1),
    )
    .await
    .unwrap();

    assert_eq!(password_of(&passwords, &alice()).as_deref(), Some("NewPass1"));
}

#[tokio::test(start_paused = true)]
async fn should_give_up_on_hanging_notifier() {
    let (directory, codes) = directory_and_codes();
    let codes_handle = codes.codes_handle();

    let usecase = RequestCodeUseCase {
        accounts: directory,
        codes,
        notifier: MockNotifier::new(Delivery::Hang),
        delivery_timeout: Duration::from_millis(200),
    };

    let out = usecase
        .execute_at(
            RequestCodeInput {
                email: alice().email,
            },
            t0(),
        )
        .await
        .unwrap();

    assert!(!out.delivered);
    assert_eq!(codes_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_expire_previous_code_when_new_one_issued() {
    let (directory, codes) = directory_and_codes();
    let codes_handle = codes.codes_handle();
    let usecase = request_code_usecase(directory, codes, MockNotifier::accepting());

    for offset in [0, 2] {
        usecase
            .execute_at(
                RequestCodeInput {
                    email: alice().email,
                },
                t0() + ChronoDuration::minutes(offset),
            )
            .await
            .unwrap();
    }

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 2);
    assert_eq!(codes[0].expires_at, t0() + ChronoDuration::minutes(2));
    assert!(codes[0].used_at.is_none());
    assert_eq!(codes[1].expires_at, t0() + ChronoDuration::minutes(12));
    assert!(codes[1].id > codes[0].id);
}

#[tokio::test]
async fn directory_reports_which_emails_have_accounts() {
    let (directory, _) = directory_and_codes();

    assert!(directory.exists(&alice().email).await.unwrap());
    assert!(!directory.exists("ghost@example.com").await.unwrap());
}
