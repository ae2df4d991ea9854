use std::sync::Mutex;

use studybuddy_bot::services::reminder::{broadcast, MORNING_DIGEST};

#[tokio::test]
async fn broadcast_attempts_every_recipient_despite_a_failure() {
    let attempted: Mutex<Vec<i64>> = Mutex::new(Vec::new());
    let recipients = vec![1, 2, 3];

    let delivered = broadcast(&recipients, |user_id| {
        attempted.lock().unwrap().push(user_id);
        async move {
            if user_id == 2 {
                Err("bot was blocked by the user".to_string())
            } else {
                Ok(())
            }
        }
    })
    .await;

    assert_eq!(delivered, 2);
    assert_eq!(*attempted.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn broadcast_counts_all_successes() {
    let recipients = vec![10, 20, 30, 40];
    let delivered = broadcast(&recipients, |_| async { Ok::<(), String>(()) }).await;
    assert_eq!(delivered, 4);
}

#[tokio::test]
async fn broadcast_over_no_recipients_is_a_no_op() {
    let delivered = broadcast(&[], |_| async { Ok::<(), String>(()) }).await;
    assert_eq!(delivered, 0);
}

#[test]
fn digest_text_is_fixed_and_nonempty() {
    assert!(MORNING_DIGEST.contains("Good morning"));
}
