//! Pipeline controller
//!
//! Drives serial bytes through frame assembly, quantization, inference and
//! class selection, and reports each stage to the presenter and the serial
//! report line.
//!
//! The controller owns all mutable state. The firmware calls
//! [`Pipeline::poll`] in a tight loop; each call waits at most the configured
//! read timeout for one byte, so periodic work is never starved.
//!
//! ```text
//! Init ──EngineReady──▶ WaitingForData ──ByteReceived──▶ Collecting
//!  │                         ▲                              │
//!  EngineFailed              └──Inference{Succeeded,Failed}─┤ FrameComplete
//!  ▼                                                        ▼
//! FatalError                                            Processing
//! ```

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use heapless::String;
use numeral_hal::{UartRx, UartTx};

use crate::config::PipelineConfig;
use crate::frame::{FrameAssembler, FrameError, FRAME_LEN};
use crate::messages;
use crate::quant::QuantParams;
use crate::select::{self, PredictedClass, NUM_CLASSES};
use crate::state::{Event, State};
use crate::traits::{EngineInitError, InferenceEngine, InferenceError, Presenter};

/// Outcome of one pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// [`Pipeline::start`] has not completed
    NotStarted,
    /// No byte arrived within the read timeout
    Idle,
    /// Byte added to the current frame
    Accepted { received: usize },
    /// Frame classified and reported
    Predicted(PredictedClass),
    /// Frame discarded after an inference failure
    InferenceFailed(InferenceError),
    /// Engine init failed earlier; input is no longer consumed
    Halted,
    /// The serial link reported an error
    ReadFailed,
    /// The assembler refused the byte; the pending frame was dropped
    Discarded(FrameError),
}

/// Streaming classification controller
pub struct Pipeline<E, P> {
    /// Current pipeline state
    state: State,
    /// Inference runtime, owns the tensors
    engine: E,
    /// Status output
    presenter: P,
    /// Frame being received
    assembler: FrameAssembler,
    /// Input quantization, fetched once after init
    params: Option<QuantParams>,
    config: PipelineConfig,
}

impl<E, P> Pipeline<E, P>
where
    E: InferenceEngine,
    P: Presenter,
{
    /// Create a controller in the `Init` state
    pub fn new(engine: E, presenter: P, config: PipelineConfig) -> Self {
        Self {
            state: State::Init,
            engine,
            presenter,
            assembler: FrameAssembler::new(),
            params: None,
            config,
        }
    }

    /// Bring up the engine
    ///
    /// Shows the boot screen, waits `boot_delay_ms` so the host can open the
    /// port, then initializes and validates the engine. On failure the
    /// pipeline enters `FatalError` and never leaves it.
    pub fn start<T, D>(
        &mut self,
        report: &mut T,
        delay: &mut D,
    ) -> Result<QuantParams, EngineInitError>
    where
        T: UartTx,
        D: DelayNs,
    {
        if let State::FatalError(e) = self.state {
            return Err(e);
        }
        if let Some(params) = self.params {
            return Ok(params);
        }

        self.presenter.show_status(messages::STATUS_BOOT).ok();
        delay.delay_ms(self.config.boot_delay_ms);

        match self.bring_up() {
            Ok(params) => {
                self.params = Some(params);
                self.transition(Event::EngineReady);
                self.presenter.show_status(messages::STATUS_WAITING).ok();
                report.write_line(messages::REPORT_WAITING).ok();
                Ok(params)
            }
            Err(e) => {
                report.write_line(messages::REPORT_INIT_FAILED).ok();
                self.presenter.show_error(messages::ERROR_INIT).ok();
                self.transition(Event::EngineFailed(e));
                Err(e)
            }
        }
    }

    /// Initialize the engine and check it matches this pipeline
    fn bring_up(&mut self) -> Result<QuantParams, EngineInitError> {
        self.engine.init()?;

        let input_len = self.engine.input_mut().len();
        if input_len != FRAME_LEN {
            return Err(EngineInitError::InputShape {
                expected: FRAME_LEN,
                actual: input_len,
            });
        }

        let output_len = self.engine.output().len();
        if output_len != NUM_CLASSES {
            return Err(EngineInitError::OutputShape {
                expected: NUM_CLASSES,
                actual: output_len,
            });
        }

        QuantParams::new(self.engine.input_scale(), self.engine.input_zero_point())
            .map_err(|_| EngineInitError::InvalidScale)
    }

    /// Run one iteration of the poll loop
    ///
    /// Waits up to `read_timeout_us` for a byte and feeds it. Does not touch
    /// the link before `start` or after a fatal error.
    pub fn poll<S>(&mut self, serial: &mut S) -> Step
    where
        S: UartRx + UartTx,
    {
        if self.state.is_fatal() {
            return Step::Halted;
        }
        if !self.state.accepts_bytes() {
            return Step::NotStarted;
        }

        match serial.read_byte_timeout(self.config.read_timeout_us) {
            Ok(Some(byte)) => self.feed(byte, serial),
            Ok(None) => Step::Idle,
            Err(_) => Step::ReadFailed,
        }
    }

    /// Feed one received byte
    ///
    /// Completing a frame runs the whole processing stage before returning.
    pub fn feed<T: UartTx>(&mut self, byte: u8, report: &mut T) -> Step {
        if self.state.is_fatal() {
            return Step::Halted;
        }
        if !self.state.accepts_bytes() {
            return Step::NotStarted;
        }

        if self.state == State::WaitingForData {
            self.presenter.show_status(messages::STATUS_COLLECTING).ok();
        }
        self.transition(Event::ByteReceived);

        if let Err(e) = self.assembler.accept(byte) {
            // Full frames are processed on arrival, so a stale one is dropped
            self.assembler.reset();
            self.transition(Event::FrameDiscarded);
            self.presenter.show_status(messages::STATUS_WAITING).ok();
            return Step::Discarded(e);
        }

        let received = self.assembler.len();
        if self.config.progress_due(received) {
            self.presenter
                .show_progress(self.assembler.progress_fraction())
                .ok();
        }

        if self.assembler.is_full() {
            self.transition(Event::FrameComplete);
            return self.process(report);
        }

        Step::Accepted { received }
    }

    /// Classify the completed frame and report the result
    fn process<T: UartTx>(&mut self, report: &mut T) -> Step {
        report.write_line(messages::REPORT_PROCESSING).ok();
        self.presenter.show_status(messages::STATUS_PROCESSING).ok();

        let step = match self.classify() {
            Ok(class) => {
                report_prediction(report, class);
                self.presenter.show_prediction(class).ok();
                self.transition(Event::InferenceSucceeded);
                Step::Predicted(class)
            }
            Err(e) => {
                report.write_line(messages::REPORT_INFERENCE_FAILED).ok();
                self.presenter.show_error(messages::ERROR_INFERENCE).ok();
                self.transition(Event::InferenceFailed);
                Step::InferenceFailed(e)
            }
        };

        self.assembler.reset();
        step
    }

    /// Quantize into the engine input, invoke, select
    fn classify(&mut self) -> Result<PredictedClass, InferenceError> {
        let params = self.params.ok_or(InferenceError::InputWrite)?;
        let frame = self.assembler.frame().ok_or(InferenceError::InputWrite)?;

        // The input view is fully written before invoke reads it
        params
            .quantize_frame(frame, self.engine.input_mut())
            .map_err(|_| InferenceError::InputWrite)?;

        self.engine.invoke()?;

        select::select(self.engine.output()).ok_or(InferenceError::EmptyOutput)
    }

    fn transition(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Bytes received in the current cycle
    pub fn received(&self) -> usize {
        self.assembler.len()
    }

    /// Input quantization, once started
    pub fn params(&self) -> Option<QuantParams> {
        self.params
    }

    /// Controller settings
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Inference engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Presenter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

/// Emit `Predito: <digit>` on the report line
fn report_prediction<T: UartTx>(report: &mut T, class: PredictedClass) {
    let mut line: String<16> = String::new();
    if write!(line, "{}{}", messages::REPORT_PREDICTION_PREFIX, class).is_ok() {
        report.write_line(&line).ok();
    }
}
