use super::create_test_service;
use crate::core::errors::GroupStayError;
use crate::core::models::{GroupStatus, ParticipantStatus};
use uuid::Uuid;

#[tokio::test]
async fn test_confirm_requires_organizer() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let member = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(3))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, member).await.unwrap();

    let result = ctx.service.confirm_group(group.id, member).await;
    assert!(matches!(result, Err(GroupStayError::NotOrganizer(_))));
}

#[tokio::test]
async fn test_completeness_gate_creates_no_bookings() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let roomless = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(3))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, roomless).await.unwrap();
    ctx.service
        .select_room(group.id, organizer, ctx.rooms[0], 1, None)
        .await
        .unwrap();

    let result = ctx.service.confirm_group(group.id, organizer).await;
    match result {
        Err(GroupStayError::IncompleteSelection(users)) => {
            assert_eq!(users, vec![roomless.to_string()]);
        }
        other => panic!("expected IncompleteSelection, got {:?}", other),
    }

    // Refused up front: not a single booking was attempted
    assert_eq!(ctx.service.booking().booking_count().await, 0);
    let view = ctx.service.get_group(group.id).await.unwrap();
    assert_eq!(view.group.status, GroupStatus::Open);
}

#[tokio::test]
async fn test_full_confirmation_totals_bookings() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(3))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, second).await.unwrap();
    ctx.service.join_group(&group.code, third).await.unwrap();
    for (user, room) in [
        (organizer, ctx.rooms[0]),
        (second, ctx.rooms[1]),
        (third, ctx.rooms[2]),
    ] {
        ctx.service
            .select_room(group.id, user, room, 1, None)
            .await
            .unwrap();
    }
    ctx.service.lock_group(group.id, organizer).await.unwrap();

    let confirmed = ctx.service.confirm_group(group.id, organizer).await.unwrap();

    assert_eq!(confirmed.status, GroupStatus::Confirmed);
    assert!(confirmed.confirmed_at.is_some());
    // Two nights at 100 + 150 + 200 per night
    assert_eq!(confirmed.total_price, Some(900.0));
    for participant in confirmed.active_participants() {
        assert_eq!(participant.status, ParticipantStatus::Confirmed);
        let booking_id = participant.booking_id.expect("booking linked");
        let booking = ctx
            .service
            .booking()
            .get_booking(booking_id)
            .await
            .expect("booking exists");
        assert_eq!(booking.request.user_id, participant.user_id);
        assert_eq!(booking.request.check_in, group.check_in);
        assert_eq!(booking.request.check_out, group.check_out);
    }
    assert_eq!(ctx.service.booking().booking_count().await, 3);
}

#[tokio::test]
async fn test_partial_failure_keeps_earlier_bookings() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(3))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, second).await.unwrap();
    ctx.service.join_group(&group.code, third).await.unwrap();
    for (user, room) in [
        (organizer, ctx.rooms[0]),
        (second, ctx.rooms[1]),
        (third, ctx.rooms[2]),
    ] {
        ctx.service
            .select_room(group.id, user, room, 1, None)
            .await
            .unwrap();
    }
    ctx.service.lock_group(group.id, organizer).await.unwrap();

    // Participants book in join order; the second one is made to fail
    ctx.service.booking().fail_create_for_user(second).await;

    let result = ctx.service.confirm_group(group.id, organizer).await;
    match result {
        Err(GroupStayError::PartialConfirmation(user, _)) => {
            assert_eq!(user, second.to_string());
        }
        other => panic!("expected PartialConfirmation, got {:?}", other),
    }

    // No rollback: the first booking stands, later participants untouched,
    // group not confirmed.
    let view = ctx.service.get_group(group.id).await.unwrap();
    assert_eq!(view.group.status, GroupStatus::Locked);
    let first = view.group.participant_for(organizer).unwrap();
    assert_eq!(first.status, ParticipantStatus::Confirmed);
    assert!(first.booking_id.is_some());
    for user in [second, third] {
        let participant = view.group.participant_for(user).unwrap();
        assert_eq!(participant.status, ParticipantStatus::Pending);
        assert!(participant.booking_id.is_none());
    }
    assert_eq!(ctx.service.booking().booking_count().await, 1);
}

#[tokio::test]
async fn test_retry_after_partial_failure_never_double_books() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let second = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(2))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, second).await.unwrap();
    ctx.service
        .select_room(group.id, organizer, ctx.rooms[0], 1, None)
        .await
        .unwrap();
    ctx.service
        .select_room(group.id, second, ctx.rooms[1], 1, None)
        .await
        .unwrap();

    ctx.service.booking().fail_create_for_user(second).await;
    let result = ctx.service.confirm_group(group.id, organizer).await;
    assert!(matches!(
        result,
        Err(GroupStayError::PartialConfirmation(_, _))
    ));

    // Operator retries once the downstream recovers
    ctx.service.booking().clear_create_failure(second).await;
    let confirmed = ctx.service.confirm_group(group.id, organizer).await.unwrap();

    assert_eq!(confirmed.status, GroupStatus::Confirmed);
    // Two nights at 100 + 150 per night
    assert_eq!(confirmed.total_price, Some(500.0));
    // The participant confirmed by the first attempt was not booked again
    assert_eq!(
        ctx.service.booking().bookings_for_user(organizer).await.len(),
        1
    );
    assert_eq!(ctx.service.booking().booking_count().await, 2);

    // Confirm is guarded against re-running on a confirmed group
    let result = ctx.service.confirm_group(group.id, organizer).await;
    assert!(matches!(
        result,
        Err(GroupStayError::GroupAlreadyConfirmed(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_unresponsive_booking_call_times_out_as_partial_failure() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(1))
        .await
        .unwrap();
    ctx.service
        .select_room(group.id, organizer, ctx.rooms[0], 1, None)
        .await
        .unwrap();

    // The downstream never answers; the paused clock jumps straight to the
    // per-call deadline.
    ctx.service.booking().hang_create_for_user(organizer).await;

    let result = ctx.service.confirm_group(group.id, organizer).await;
    match result {
        Err(GroupStayError::PartialConfirmation(user, reason)) => {
            assert_eq!(user, organizer.to_string());
            assert!(reason.contains("exceeded"), "unexpected reason: {}", reason);
        }
        other => panic!("expected PartialConfirmation, got {:?}", other),
    }

    // Timing out leaves no booking behind and the group unconfirmed
    assert_eq!(ctx.service.booking().booking_count().await, 0);
    let view = ctx.service.get_group(group.id).await.unwrap();
    assert_eq!(view.group.status, GroupStatus::Open);
    let participant = view.group.participant_for(organizer).unwrap();
    assert_eq!(participant.status, ParticipantStatus::Pending);
    assert!(participant.booking_id.is_none());
}

#[tokio::test]
async fn test_cancel_cascades_and_swallows_booking_failures() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let second = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(2))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, second).await.unwrap();
    ctx.service
        .select_room(group.id, organizer, ctx.rooms[0], 1, None)
        .await
        .unwrap();
    ctx.service
        .select_room(group.id, second, ctx.rooms[1], 1, None)
        .await
        .unwrap();

    // Leave the group partially confirmed so one participant holds a booking
    ctx.service.booking().fail_create_for_user(second).await;
    let _ = ctx.service.confirm_group(group.id, organizer).await;
    let view = ctx.service.get_group(group.id).await.unwrap();
    let booking_id = view
        .group
        .participant_for(organizer)
        .unwrap()
        .booking_id
        .unwrap();

    // The downstream cancellation fails, the group cancellation must not
    ctx.service.booking().fail_cancellation_of(booking_id).await;
    let cancelled = ctx
        .service
        .cancel_group(group.id, organizer, "plans fell through")
        .await
        .unwrap();

    assert_eq!(cancelled.status, GroupStatus::Cancelled);
    for participant in &cancelled.participants {
        assert_eq!(participant.status, ParticipantStatus::Cancelled);
    }
    // The booking record is still live downstream; only the group moved on
    let booking = ctx.service.booking().get_booking(booking_id).await.unwrap();
    assert!(!booking.cancelled);
}

#[tokio::test]
async fn test_cancel_cascade_cancels_linked_bookings() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let second = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(2))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, second).await.unwrap();
    ctx.service
        .select_room(group.id, organizer, ctx.rooms[0], 1, None)
        .await
        .unwrap();

    ctx.service.booking().fail_create_for_user(second).await;
    ctx.service
        .select_room(group.id, second, ctx.rooms[1], 1, None)
        .await
        .unwrap();
    let _ = ctx.service.confirm_group(group.id, organizer).await;
    let view = ctx.service.get_group(group.id).await.unwrap();
    let booking_id = view
        .group
        .participant_for(organizer)
        .unwrap()
        .booking_id
        .unwrap();

    ctx.service
        .cancel_group(group.id, organizer, "trip cancelled")
        .await
        .unwrap();

    let booking = ctx.service.booking().get_booking(booking_id).await.unwrap();
    assert!(booking.cancelled);
}

#[tokio::test]
async fn test_leave_refused_while_holding_booking() {
    let ctx = create_test_service().await;
    let organizer = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();
    let group = ctx
        .service
        .create_group(organizer, ctx.group_input(3))
        .await
        .unwrap();
    ctx.service.join_group(&group.code, second).await.unwrap();
    ctx.service.join_group(&group.code, third).await.unwrap();
    for (user, room) in [
        (organizer, ctx.rooms[0]),
        (second, ctx.rooms[1]),
        (third, ctx.rooms[2]),
    ] {
        ctx.service
            .select_room(group.id, user, room, 1, None)
            .await
            .unwrap();
    }

    // Partial confirm books the organizer and the second participant, then
    // fails on the third; the group stays open.
    ctx.service.booking().fail_create_for_user(third).await;
    let _ = ctx.service.confirm_group(group.id, organizer).await;

    let result = ctx.service.leave_group(group.id, second).await;
    assert!(matches!(
        result,
        Err(GroupStayError::ParticipantHasBooking(_, _))
    ));
    // The still-pending participant can leave
    ctx.service.leave_group(group.id, third).await.unwrap();
}
