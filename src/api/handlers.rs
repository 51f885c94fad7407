use crate::{
    api::models::*,
    core::{
        models::Group,
        services::{CreateGroupInput, GroupStayService, GroupView},
    },
    infrastructure::{
        booking::in_memory::InMemoryBookingEngine, notify::channel::ChannelNotifier,
        storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use uuid::Uuid;

pub type Service = GroupStayService<InMemoryStorage, InMemoryBookingEngine, ChannelNotifier>;

// Define API routes
pub fn api_routes(service: Arc<Service>) -> Router {
    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/join", post(join_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/room", post(select_room))
        .route("/groups/{group_id}/lock", post(lock_group))
        .route("/groups/{group_id}/confirm", post(confirm_group))
        .route("/groups/{group_id}/cancel", post(cancel_group))
        .route("/groups/{group_id}/leave", post(leave_group))
        .route("/groups/code/{code}", get(get_group_by_code))
        .route("/users/{user_id}/groups", get(get_user_groups))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created, organizer auto-enrolled", body = Group),
        (status = 400, description = "Invalid dates or input", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(service): State<Arc<Service>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service
        .create_group(
            req.organizer_id,
            CreateGroupInput {
                hotel_id: req.hotel_id,
                name: req.name,
                check_in: req.check_in,
                check_out: req.check_out,
                max_participants: req.max_participants,
                join_deadline: req.join_deadline,
                notes: req.notes,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    post,
    path = "/api/groups/join",
    request_body = JoinGroupRequest,
    responses(
        (status = 200, description = "Joined the group", body = Group),
        (status = 400, description = "Group not open or deadline passed", body = ErrorResponse),
        (status = 404, description = "Unknown join code", body = ErrorResponse),
        (status = 409, description = "Already a member or group full", body = ErrorResponse)
    )
)]
pub(crate) async fn join_group(
    State(service): State<Arc<Service>>,
    Json(req): Json<JoinGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service.join_group(&req.code, req.user_id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/room",
    params(("group_id" = Uuid, Path, description = "Group to select a room in")),
    request_body = SelectRoomRequest,
    responses(
        (status = 200, description = "Room assigned to the participant", body = Group),
        (status = 404, description = "Group or room not found", body = ErrorResponse),
        (status = 409, description = "Room already selected by another participant", body = ErrorResponse)
    )
)]
pub(crate) async fn select_room(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<SelectRoomRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .select_room(
            group_id,
            req.user_id,
            req.room_id,
            req.num_guests,
            req.special_requests,
        )
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/lock",
    params(("group_id" = Uuid, Path, description = "Group to lock")),
    request_body = LockGroupRequest,
    responses(
        (status = 200, description = "Group locked", body = Group),
        (status = 400, description = "Group not open", body = ErrorResponse),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse)
    )
)]
pub(crate) async fn lock_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<LockGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service.lock_group(group_id, req.organizer_id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/confirm",
    params(("group_id" = Uuid, Path, description = "Group to confirm")),
    request_body = ConfirmGroupRequest,
    responses(
        (status = 200, description = "All participants booked, group confirmed", body = Group),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse),
        (status = 422, description = "Participants without a room selection", body = ErrorResponse),
        (status = 502, description = "Confirm aborted, earlier bookings stand", body = ErrorResponse)
    )
)]
pub(crate) async fn confirm_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<ConfirmGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service.confirm_group(group_id, req.organizer_id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/cancel",
    params(("group_id" = Uuid, Path, description = "Group to cancel")),
    request_body = CancelGroupRequest,
    responses(
        (status = 200, description = "Group cancelled, bookings cancelled best-effort", body = Group),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse),
        (status = 409, description = "Group already confirmed", body = ErrorResponse)
    )
)]
pub(crate) async fn cancel_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<CancelGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .cancel_group(group_id, req.organizer_id, &req.reason)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/leave",
    params(("group_id" = Uuid, Path, description = "Group to leave")),
    request_body = LeaveGroupRequest,
    responses(
        (status = 200, description = "Participant removed, room released", body = Group),
        (status = 400, description = "Group not open or booking still linked", body = ErrorResponse),
        (status = 403, description = "Organizer cannot leave", body = ErrorResponse)
    )
)]
pub(crate) async fn leave_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<LeaveGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service.leave_group(group_id, req.user_id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = Uuid, Path, description = "Group to retrieve"),
        ("user_id" = Option<Uuid>, Query, description = "Restrict the view to this member")
    ),
    responses(
        (status = 200, description = "Group with participant count and joinability", body = GroupView),
        (status = 403, description = "Requester is not a member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<GetGroupQuery>,
) -> Result<Json<GroupView>, ApiError> {
    let view = match query.user_id {
        Some(user_id) => service.get_group_for_member(group_id, user_id).await?,
        None => service.get_group(group_id).await?,
    };
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/groups/code/{code}",
    params(("code" = String, Path, description = "Join code of the group")),
    responses(
        (status = 200, description = "Group for the code", body = GroupView),
        (status = 404, description = "Unknown join code", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_by_code(
    State(service): State<Arc<Service>>,
    Path(code): Path<String>,
) -> Result<Json<GroupView>, ApiError> {
    let view = service.get_group_by_code(&code).await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/groups",
    params(("user_id" = Uuid, Path, description = "User whose groups to list")),
    responses(
        (status = 200, description = "Groups the user participates in", body = Vec<Group>)
    )
)]
pub(crate) async fn get_user_groups(
    State(service): State<Arc<Service>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = service.get_user_groups(user_id).await?;
    Ok(Json(groups))
}
