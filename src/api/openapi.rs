use utoipa::OpenApi;

use crate::{
    api::models::{
        CancelGroupRequest, ConfirmGroupRequest, CreateGroupRequest, ErrorResponse,
        JoinGroupRequest, LeaveGroupRequest, LockGroupRequest, SelectRoomRequest,
    },
    core::{
        models::{Group, GroupStatus, Hotel, Participant, ParticipantStatus, Room},
        services::GroupView,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::join_group,
        super::handlers::select_room,
        super::handlers::lock_group,
        super::handlers::confirm_group,
        super::handlers::cancel_group,
        super::handlers::leave_group,
        super::handlers::get_group,
        super::handlers::get_group_by_code,
        super::handlers::get_user_groups
    ),
    components(schemas(
        CreateGroupRequest,
        JoinGroupRequest,
        SelectRoomRequest,
        LockGroupRequest,
        ConfirmGroupRequest,
        CancelGroupRequest,
        LeaveGroupRequest,
        ErrorResponse,
        Group,
        GroupStatus,
        GroupView,
        Participant,
        ParticipantStatus,
        Hotel,
        Room
    )),
    info(
        title = "GroupStay API",
        description = "Coordination engine for multi-room group hotel stays",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
