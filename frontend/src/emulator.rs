use std::time::{Duration, Instant};

use log::{error, info, warn};
use retroport_core::core::MAX_PORTS;
use retroport_core::core::machine::Machine;
use retroport_core::session::{Session, SessionConfig};

use crate::config::ConfigError;
use crate::host::{HostCommand, SdlHost};
use crate::input::KeyMap;
use crate::overlay;
use crate::video::Video;

/// Sleeps out the remainder of each frame at the negotiated rate.
pub struct FramePacer {
    period: Duration,
    deadline: Instant,
}

impl FramePacer {
    pub fn new(hz: f64) -> Self {
        Self {
            period: Self::period_for(hz),
            deadline: Instant::now(),
        }
    }

    fn period_for(hz: f64) -> Duration {
        Duration::from_secs_f64(1.0 / hz.max(1.0))
    }

    pub fn set_rate(&mut self, hz: f64) {
        info!("frame rate set to {hz:.4} Hz");
        self.period = Self::period_for(hz);
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next frame deadline. A frame that overran by more than
    /// one period restarts the schedule instead of catching up.
    pub fn wait(&mut self) {
        self.deadline += self.period;
        let now = Instant::now();
        if self.deadline > now {
            std::thread::sleep(self.deadline - now);
        } else if now - self.deadline > self.period {
            self.deadline = now;
        }
    }
}

/// Frames per second over one-second windows.
struct FpsCounter {
    frames: u32,
    since: Instant,
    text: String,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
            text: String::new(),
        }
    }

    fn tick(&mut self, region: &str) -> &str {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames as f64 / elapsed.as_secs_f64();
            self.text = format!("{fps:.1} {region}");
            self.frames = 0;
            self.since = Instant::now();
        }
        &self.text
    }
}

pub struct RunOptions {
    pub scale: u32,
    pub show_status: bool,
}

/// Run the machine until the window closes.
///
/// `reload` re-reads the configuration when F11 is pressed.
pub fn run(
    session: &mut Session,
    machine: &mut dyn Machine,
    key_map: KeyMap,
    options: &RunOptions,
    mut reload: impl FnMut() -> Result<SessionConfig, ConfigError>,
) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let (width, height) = machine.display_size();
    let av_info = session.av_info();
    let mut video = Video::new(
        &sdl_video,
        "Retroport",
        width,
        height,
        &av_info.geometry,
        options.scale,
    );
    let mut host = SdlHost::new(&sdl_context, key_map);

    let buffer_size = (width * height * 3) as usize;
    let mut framebuffer = vec![0u8; buffer_size];

    let mut pacer = FramePacer::new(av_info.fps);
    let mut fps = FpsCounter::new();

    'main: loop {
        for command in host.pump_events() {
            match command {
                HostCommand::Quit => break 'main,
                HostCommand::Reload => match reload() {
                    Ok(config) => {
                        if let Err(e) = session.reload(&config) {
                            warn!("{e}");
                        }
                        info!("configuration reloaded");
                    }
                    Err(e) => error!("reload failed: {e}"),
                },
                HostCommand::Reset => session.reset(machine),
                HostCommand::ToggleGrab => host.toggle_grab(),
            }
        }

        session.run_frame(&mut host, machine);

        if let Some(geometry) = host.take_geometry() {
            video.resize(&geometry, options.scale);
        }
        if let Some(hz) = host.take_frame_rate() {
            pacer.set_rate(hz);
        }

        machine.render_frame(&mut framebuffer);
        let region = session.negotiator().region().name();
        overlay::draw_fps(&mut framebuffer, width as usize, fps.tick(region));
        if options.show_status {
            let ports: Vec<[u8; 3]> = (0..MAX_PORTS)
                .map(|port| session.input().port_status(port))
                .collect();
            overlay::draw_ports(&mut framebuffer, width as usize, &ports);
        }
        video.present(&framebuffer);

        pacer.wait();
    }
}
