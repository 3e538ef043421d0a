//! Media proxy routing: local calls, remote forwarding and callback fan-out.

// Test files legitimately use expect() for readable assertions.
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

mod common;

use bluetooth::{
    init_local_player, resume_object_registration, Characteristic, ClientEvent, ControllerMessage,
    PlayerHandle, ProxyError, RemoteError, SyncMediaControl, Value, WriteRequest,
};
use common::{MockClient, Recording, TestProxy, PEER};
use library::Catalog;
use platform::mocks::MockOts;
use platform::{CcidAllocator, ConnHandle, ObjectId, OtsError, PlayerConfig};
use playback::{
    Command, CommandNtf, EventLog, MediaPlayer, MediaState, Mpl, ObjectError, Opcode, PlayerEvent,
    Registration, ResultCode,
};

fn builtin_player() -> Mpl {
    Mpl::builtin(&mut CcidAllocator::new()).expect("builtin catalog")
}

fn proxy_with_player() -> TestProxy {
    let mut proxy = TestProxy::new(MockClient::default());
    proxy.register_sync_controller(EventLog::new());
    proxy.register_controller(Recording::default());
    proxy
        .register_local_player(builtin_player())
        .expect("first local player");
    proxy
}

fn messages(proxy: &TestProxy) -> &[ControllerMessage] {
    &proxy.controller().expect("controller registered").messages
}

fn with_remote() -> TestProxy {
    let mut proxy = proxy_with_player();
    proxy.discover_player(PEER).expect("discovery starts");
    proxy.on_client_event(ClientEvent::Discovered {
        conn: PEER,
        result: Ok(()),
    });
    proxy
}

// ── Registration ─────────────────────────────────────────────────────────────

#[test]
fn test_second_local_player_is_refused() {
    let mut proxy = proxy_with_player();
    assert_eq!(
        proxy.register_local_player(builtin_player()),
        Err(ProxyError::AlreadyRegistered)
    );
}

#[test]
fn test_player_registration_announces_local_player() {
    let proxy = proxy_with_player();
    assert_eq!(
        messages(&proxy),
        [ControllerMessage::PlayerAvailable {
            player: PlayerHandle::Local,
            result: Ok(()),
        }]
    );
}

#[test]
fn test_late_controller_is_told_at_once() {
    let mut proxy = TestProxy::new(MockClient::default());
    proxy
        .register_local_player(builtin_player())
        .expect("first local player");
    proxy.register_controller(Recording::default());
    assert_eq!(
        messages(&proxy),
        [ControllerMessage::PlayerAvailable {
            player: PlayerHandle::Local,
            result: Ok(()),
        }]
    );
}

#[test]
fn test_controller_without_player_hears_nothing() {
    let mut proxy = TestProxy::new(MockClient::default());
    proxy.register_controller(Recording::default());
    assert!(messages(&proxy).is_empty());
}

// ── Local player ─────────────────────────────────────────────────────────────

#[test]
fn test_local_read_answers_immediately() {
    let mut proxy = proxy_with_player();
    proxy
        .read(PlayerHandle::Local, Characteristic::TrackTitle)
        .expect("readable");
    let title = heapless::String::try_from("Interlude #1 (Song for Alison)").expect("fits");
    assert_eq!(
        messages(&proxy).last(),
        Some(&ControllerMessage::Value {
            player: PlayerHandle::Local,
            characteristic: Characteristic::TrackTitle,
            result: Ok(Value::TrackTitle(title)),
        })
    );
}

#[test]
fn test_write_only_characteristics_are_not_supported() {
    let mut proxy = proxy_with_player();
    let before = messages(&proxy).len();
    for c in [
        Characteristic::MediaControlPoint,
        Characteristic::SearchControlPoint,
        Characteristic::TrackChanged,
    ] {
        let result = proxy.read(PlayerHandle::Local, c);
        assert_eq!(result, Err(ProxyError::NotSupported));
        assert_eq!(result.map_err(|e| e.errno()), Err(-95));
        assert_eq!(proxy.read_local(c), Err(ProxyError::NotSupported));
    }
    assert_eq!(messages(&proxy).len(), before);
}

#[test]
fn test_write_only_read_is_not_forwarded_to_remote() {
    let mut proxy = with_remote();
    assert_eq!(
        proxy.read(PlayerHandle::Remote(PEER), Characteristic::MediaControlPoint),
        Err(ProxyError::NotSupported)
    );
    assert!(proxy.client().reads.is_empty());
}

#[test]
fn test_local_write_fans_out_then_confirms() {
    let mut proxy = proxy_with_player();
    let play = WriteRequest::Command(Command::new(Opcode::Play));
    proxy
        .write(PlayerHandle::Local, &play)
        .expect("local write");

    let ntf = CommandNtf {
        requested_opcode: Opcode::Play.code(),
        result: ResultCode::Success,
    };
    assert_eq!(
        proxy.sync_controller().expect("sync controller").events(),
        [
            PlayerEvent::MediaState(MediaState::Playing),
            PlayerEvent::CommandResult(ntf),
        ]
    );

    let msgs = messages(&proxy);
    assert_eq!(msgs.len(), 4);
    assert_eq!(
        msgs[1],
        ControllerMessage::Value {
            player: PlayerHandle::Local,
            characteristic: Characteristic::MediaState,
            result: Ok(Value::MediaState(MediaState::Playing)),
        }
    );
    assert_eq!(
        msgs[2],
        ControllerMessage::Value {
            player: PlayerHandle::Local,
            characteristic: Characteristic::MediaControlPoint,
            result: Ok(Value::CommandResult(ntf)),
        }
    );
    assert_eq!(
        msgs[3],
        ControllerMessage::Written {
            player: PlayerHandle::Local,
            request: play,
            result: Ok(()),
        }
    );
}

#[test]
fn test_track_jump_reaches_both_controllers_in_order() {
    let mut proxy = proxy_with_player();
    proxy
        .write(
            PlayerHandle::Local,
            &WriteRequest::Command(Command::new(Opcode::NextTrack)),
        )
        .expect("local write");
    assert_eq!(
        proxy.controller().expect("controller").characteristics(),
        [
            Characteristic::TrackChanged,
            Characteristic::TrackTitle,
            Characteristic::TrackDuration,
            Characteristic::TrackPosition,
            Characteristic::CurrentTrackObjectId,
            Characteristic::NextTrackObjectId,
            Characteristic::MediaControlPoint,
        ]
    );
    assert_eq!(
        proxy.sync_controller().expect("sync controller").events().len(),
        7
    );
}

#[test]
fn test_local_calls_without_player() {
    let mut proxy = TestProxy::new(MockClient::default());
    assert_eq!(
        proxy.read(PlayerHandle::Local, Characteristic::MediaState),
        Err(ProxyError::NotSupported)
    );
    assert_eq!(
        proxy.write(PlayerHandle::Local, &WriteRequest::PlaybackSpeed(8)),
        Err(ProxyError::NotSupported)
    );
    assert_eq!(ProxyError::NotSupported.errno(), -95);
}

// ── Remote player ────────────────────────────────────────────────────────────

#[test]
fn test_remote_handle_before_discovery() {
    let mut proxy = proxy_with_player();
    assert_eq!(
        proxy.read(PlayerHandle::Remote(PEER), Characteristic::MediaState),
        Err(ProxyError::NotSupported)
    );
    assert!(proxy.client().reads.is_empty());
}

#[test]
fn test_discovery_registers_remote_player() {
    let mut proxy = proxy_with_player();
    proxy.discover_player(PEER).expect("discovery starts");
    assert_eq!(proxy.client().discovered, [PEER]);
    assert_eq!(proxy.remote_player(), None);

    proxy.on_client_event(ClientEvent::Discovered {
        conn: PEER,
        result: Ok(()),
    });
    assert_eq!(proxy.remote_player(), Some(PlayerHandle::Remote(PEER)));
    assert_eq!(
        messages(&proxy).last(),
        Some(&ControllerMessage::PlayerAvailable {
            player: PlayerHandle::Remote(PEER),
            result: Ok(()),
        })
    );
}

#[test]
fn test_failed_discovery_is_reported() {
    let mut proxy = proxy_with_player();
    proxy.discover_player(PEER).expect("discovery starts");
    proxy.on_client_event(ClientEvent::Discovered {
        conn: PEER,
        result: Err(RemoteError::Att(0x0E)),
    });
    assert_eq!(proxy.remote_player(), None);
    assert_eq!(
        messages(&proxy).last(),
        Some(&ControllerMessage::PlayerAvailable {
            player: PlayerHandle::Remote(PEER),
            result: Err(RemoteError::Att(0x0E)),
        })
    );
}

#[test]
fn test_client_refusal_is_returned() {
    let mut proxy = proxy_with_player();
    proxy.client_mut().refuse = Some(-12);
    assert_eq!(proxy.discover_player(PEER), Err(ProxyError::Client(-12)));
    proxy.on_client_event(ClientEvent::Discovered {
        conn: PEER,
        result: Ok(()),
    });
    assert_eq!(proxy.remote_player(), None);
}

#[test]
fn test_remote_read_is_forwarded_and_decoded() {
    let mut proxy = with_remote();
    proxy
        .read(PlayerHandle::Remote(PEER), Characteristic::TrackPosition)
        .expect("forwarded");
    assert_eq!(
        proxy.client().reads,
        [(PEER, Characteristic::TrackPosition)]
    );

    proxy.on_client_event(ClientEvent::Read {
        conn: PEER,
        characteristic: Characteristic::TrackPosition,
        result: Ok(&[0x10, 0x27, 0x00, 0x00]),
    });
    assert_eq!(
        messages(&proxy).last(),
        Some(&ControllerMessage::Value {
            player: PlayerHandle::Remote(PEER),
            characteristic: Characteristic::TrackPosition,
            result: Ok(Value::TrackPosition(10_000)),
        })
    );
}

#[test]
fn test_remote_errors_pass_through() {
    let mut proxy = with_remote();
    proxy.on_client_event(ClientEvent::Read {
        conn: PEER,
        characteristic: Characteristic::TrackTitle,
        result: Err(RemoteError::Att(0x0E)),
    });
    proxy.on_client_event(ClientEvent::Read {
        conn: PEER,
        characteristic: Characteristic::TrackDuration,
        result: Ok(&[0x01, 0x02]),
    });
    let msgs = messages(&proxy);
    let n = msgs.len();
    assert_eq!(
        msgs[n - 2],
        ControllerMessage::Value {
            player: PlayerHandle::Remote(PEER),
            characteristic: Characteristic::TrackTitle,
            result: Err(RemoteError::Att(0x0E)),
        }
    );
    assert_eq!(
        msgs[n - 1],
        ControllerMessage::Value {
            player: PlayerHandle::Remote(PEER),
            characteristic: Characteristic::TrackDuration,
            result: Err(RemoteError::Att(0x0D)),
        }
    );
}

#[test]
fn test_remote_notifications_skip_sync_controller() {
    let mut proxy = with_remote();
    proxy.on_client_event(ClientEvent::Notified {
        conn: PEER,
        characteristic: Characteristic::NextTrackObjectId,
        data: &[],
    });
    assert!(proxy
        .sync_controller()
        .expect("sync controller")
        .events()
        .is_empty());
    assert_eq!(
        messages(&proxy).last(),
        Some(&ControllerMessage::Value {
            player: PlayerHandle::Remote(PEER),
            characteristic: Characteristic::NextTrackObjectId,
            result: Ok(Value::NextTrackObjectId(None)),
        })
    );
}

#[test]
fn test_remote_write_round_trip() {
    let mut proxy = with_remote();
    let request = WriteRequest::Command(Command::with_param(Opcode::MoveRelative, -500));
    proxy
        .write(PlayerHandle::Remote(PEER), &request)
        .expect("forwarded");
    assert_eq!(proxy.client().writes, [(PEER, request.clone())]);
    // The local player is untouched.
    assert!(proxy
        .sync_controller()
        .expect("sync controller")
        .events()
        .is_empty());

    proxy.on_client_event(ClientEvent::Written {
        conn: PEER,
        request: request.clone(),
        result: Ok(()),
    });
    assert_eq!(
        messages(&proxy).last(),
        Some(&ControllerMessage::Written {
            player: PlayerHandle::Remote(PEER),
            request,
            result: Ok(()),
        })
    );
}

#[test]
fn test_disconnect_forgets_remote_player() {
    let mut proxy = with_remote();
    proxy.on_disconnected(ConnHandle(0x0041));
    assert_eq!(proxy.remote_player(), Some(PlayerHandle::Remote(PEER)));

    proxy.on_disconnected(PEER);
    assert_eq!(proxy.remote_player(), None);
    assert_eq!(
        proxy.read(PlayerHandle::Remote(PEER), Characteristic::MediaState),
        Err(ProxyError::NotSupported)
    );

    let before = messages(&proxy).len();
    proxy.on_client_event(ClientEvent::Notified {
        conn: PEER,
        characteristic: Characteristic::MediaState,
        data: &[0x01],
    });
    assert_eq!(messages(&proxy).len(), before);
}

// ── Local player initialisation ──────────────────────────────────────────────

#[test]
fn test_init_registers_objects_and_player() {
    let mut proxy = TestProxy::new(MockClient::default());
    let mut ccids = CcidAllocator::new();
    let mut ots = MockOts::new();
    let registration = init_local_player(
        &mut proxy,
        PlayerConfig::default(),
        Catalog::builtin().expect("builtin catalog"),
        &mut ccids,
        Some(&mut ots),
    )
    .expect("first local player");

    assert_eq!(registration, Registration::Complete);
    assert_eq!(ots.added().len(), 20);
    let player = proxy.local_player().expect("registered");
    assert_eq!(player.icon_id().map(ObjectId::get), Some(0x100));
    assert_eq!(player.current_track_id().map(ObjectId::get), Some(0x101));
    assert_eq!(player.content_ctrl_id(), 0);

    assert_eq!(
        init_local_player(
            &mut proxy,
            PlayerConfig::default(),
            Catalog::builtin().expect("builtin catalog"),
            &mut ccids,
            None,
        ),
        Err(ProxyError::AlreadyRegistered)
    );
    // The refused player took no content control id.
    assert_eq!(ccids.allocate(), 1);
}

#[test]
fn test_init_with_deferred_object_creation() {
    let mut proxy = TestProxy::new(MockClient::default());
    let mut ots = MockOts::deferred();
    let mut registration = init_local_player(
        &mut proxy,
        PlayerConfig::default(),
        Catalog::builtin().expect("builtin catalog"),
        &mut CcidAllocator::new(),
        Some(&mut ots),
    )
    .expect("player registered");

    let mut rounds = 0;
    while registration == Registration::Pending {
        let pending = ots.added().last().expect("pending add").clone();
        proxy
            .local_player_mut()
            .expect("registered")
            .on_object_created(pending.id, pending.object_type)
            .expect("expected object");
        registration = resume_object_registration(&mut proxy, &mut ots).expect("resumed");
        rounds += 1;
    }
    assert_eq!(rounds, 20);
    let player = proxy.local_player().expect("registered");
    assert_eq!(player.current_group_id().map(ObjectId::get), Some(0x106));
}

#[test]
fn test_init_fails_when_ots_refuses() {
    let mut proxy = TestProxy::new(MockClient::default());
    let mut ots = MockOts::new().fail_at(0);
    assert_eq!(
        init_local_player(
            &mut proxy,
            PlayerConfig::default(),
            Catalog::builtin().expect("builtin catalog"),
            &mut CcidAllocator::new(),
            Some(&mut ots),
        ),
        Err(ProxyError::Objects(ObjectError::Ots(OtsError::NoSpace)))
    );
    assert!(!proxy.has_local_player());
}
