//! One emulation session: the per-frame pipeline from host poll to machine
//! frame.

use log::{debug, info};

use crate::core::host::PollSource;
use crate::core::machine::Machine;
use crate::core::sink::{AvSink, EventQueue, RedrawRequest};
use crate::input::{ControllerClass, InputLayer, PortConfig, PortError};
use crate::scheduler::{Scheduler, Turn};
use crate::video::{AvInfo, AvRequest, Negotiator, VideoConfig};

/// Everything a session is configured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub video: VideoConfig,
    pub ports: PortConfig,
}

pub struct Session {
    input: InputLayer,
    negotiator: Negotiator,
    scheduler: Scheduler,
    queue: EventQueue,
    redraw: RedrawRequest,
    geometry_pending: bool,
    first_frame: bool,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            input: InputLayer::new(&config.ports),
            negotiator: Negotiator::new(&config.video),
            scheduler: Scheduler::new(),
            queue: EventQueue::new(),
            redraw: RedrawRequest::default(),
            geometry_pending: true,
            first_frame: true,
        }
    }

    pub fn input(&self) -> &InputLayer {
        &self.input
    }

    pub fn negotiator(&self) -> &Negotiator {
        &self.negotiator
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn av_info(&self) -> AvInfo {
        self.negotiator.system_av_info()
    }

    /// Ask for the geometry to be re-declared at the start of the next frame.
    pub fn request_av_update(&mut self) {
        self.geometry_pending = true;
    }

    /// Plug a controller class into a port. Releases it produces reach the
    /// machine with the next frame.
    pub fn set_port_device(&mut self, port: usize, class: ControllerClass) -> Result<(), PortError> {
        self.input.set_port_device(port, class, &mut self.queue)
    }

    /// Apply a reloaded configuration: port classes and video state.
    ///
    /// Port assignments are applied in order and the first rejected one is
    /// returned; the video state is reloaded regardless.
    pub fn reload(&mut self, config: &SessionConfig) -> Result<(), PortError> {
        self.negotiator.reload(&config.video);
        self.geometry_pending = true;

        let mut result = Ok(());
        for (port, &class) in config.ports.classes.iter().enumerate() {
            if let Err(e) = self.set_port_device(port, class)
                && result.is_ok()
            {
                result = Err(e);
            }
        }
        result
    }

    /// Release all held input on the machine side, then reset the machine.
    pub fn reset<M: Machine + ?Sized>(&mut self, machine: &mut M) {
        self.input.release_all(&mut self.queue);
        self.queue.drain_into(machine);
        machine.reset();
        info!("machine reset");
    }

    /// Run one frame: the host turn, the handoff, the machine turn and the
    /// handoff back.
    pub fn run_frame<H, M>(&mut self, host: &mut H, machine: &mut M)
    where
        H: PollSource + AvSink + ?Sized,
        M: Machine + ?Sized,
    {
        debug_assert_eq!(self.scheduler.turn(), Turn::Host);

        if self.geometry_pending {
            self.geometry_pending = false;
            self.negotiator.update(AvRequest::GEOMETRY, false, 0.0, host);
        }
        if let Some(report) = machine.take_timing_report() {
            self.negotiator
                .update(AvRequest::BOTH, report.is_ntsc, report.hz, host);
        }

        // The first frame only presents; input starts with the second.
        if self.first_frame {
            self.first_frame = false;
        } else {
            host.poll();
            self.input
                .process_frame(&*host, &mut self.queue, &mut self.redraw);
        }

        let delivered = self.queue.drain_into(machine);
        if delivered > 0 {
            debug!("delivered {delivered} input events");
        }
        if self.redraw.take() {
            machine.invalidate_display();
        }

        self.scheduler.handoff();
        machine.run_frame();
        self.scheduler.handoff();
    }
}
