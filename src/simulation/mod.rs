//! Gameplay simulation: the player car and the parking session.
//!
//! The session advances once per frame with the (clamped) frame delta.
//! Milestones leave the session as `SessionEvent`s for logging and UI.

use bevy::prelude::*;

use crate::input::InputSnapshot;
use crate::procgen::parking::ParkingLotConfig;
use crate::procgen::traffic_cones::ConeFieldConfig;

pub mod session;
pub mod vehicles;

use session::{ParkingSession, SessionConfig, SessionEvent};
use vehicles::CarPhysicsParams;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionConfig>()
            .init_resource::<CarPhysicsParams>()
            .add_event::<SessionEvent>()
            .configure_sets(Update, SessionSystems::Sync.after(SessionSystems::Tick))
            .add_systems(Startup, setup_session.in_set(SessionSystems::Setup))
            .add_systems(
                Update,
                (tick_session.in_set(SessionSystems::Tick), report_session_events)
                    .chain(),
            );
    }
}

/// Ordering anchors for systems that read the session.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionSystems {
    /// Startup: session resource is created.
    Setup,
    /// Update: session advanced for this frame.
    Tick,
    /// Update: scene entities mirror the session.
    Sync,
}

fn setup_session(
    mut commands: Commands,
    config: Res<SessionConfig>,
    car_params: Res<CarPhysicsParams>,
    lot_config: Res<ParkingLotConfig>,
    cone_config: Res<ConeFieldConfig>,
) {
    let session = ParkingSession::new(config.clone(), *car_params, &lot_config, &cone_config);

    let spots = session.lot().len();
    if session.lot().is_empty() {
        warn!("No parking spots created; there is nothing to park in");
    } else if spots < config.required_targets {
        warn!(
            "Only {} parking spots for {} required targets; the key will never appear",
            spots, config.required_targets
        );
    }

    info!(
        "Parking lot ready: {} spots, {} cones, {:.1} x {:.1}",
        spots,
        session.cones().len(),
        session.lot().bounds.width,
        session.lot().bounds.depth
    );
    debug!("Target order: {:?}", session.targets().order());
    info!("PARKING QUEST");
    info!(
        "- Park in {} random spots (yellow pole).",
        config.required_targets
    );
    info!(
        "- Stay inside for {} seconds for it to count.",
        config.required_park_time
    );
    info!("- Then collect the key and drive through the door.");
    info!("Controls: W/S/A/D, SPACE = handbrake, R = reset, F1 = debug overlay");

    commands.insert_resource(session);
}

fn tick_session(
    time: Res<Time>,
    mut input: ResMut<InputSnapshot>,
    mut session: ResMut<ParkingSession>,
    mut events: EventWriter<SessionEvent>,
) {
    let emitted = session.tick(time.delta_secs(), &input);
    input.reset = false;
    events.send_batch(emitted);
}

fn report_session_events(mut events: EventReader<SessionEvent>) {
    for event in events.read() {
        match event {
            SessionEvent::Reset => info!("Resetting game (R pressed)."),
            SessionEvent::TargetCompleted { ordinal, spot } => {
                info!("Target parking #{} completed (spot {}).", ordinal, spot)
            }
            SessionEvent::KeySpawned => info!("All target spots done! Yellow key spawned."),
            SessionEvent::KeyCollected => info!("Key collected! Door will open."),
            SessionEvent::DoorOpened => info!("Door is open! Drive through to win."),
            SessionEvent::Won => {
                info!("************************");
                info!("         YOU WIN!       ");
                info!("************************");
            }
            SessionEvent::Status(report) => {
                let hold = report
                    .park_hold
                    .map(|h| format!(" | Park hold: {:.2} / {} s", h, report.required_park_time))
                    .unwrap_or_default();
                info!(
                    "[HUD] Speed: {:.2} m/s | Targets: {}/{} | Required park time: {} s{}",
                    report.speed, report.completed, report.required, report.required_park_time, hold
                );
            }
        }
    }
}
