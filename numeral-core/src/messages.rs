//! Operator-facing text
//!
//! Serial lines go to the host tool; only the prediction line
//! (`Predito: <digit>`) is parsed there, the rest is informational.
//! Display strings are sized for a 128x64 panel with a 6x10 font.

/// Prefix of the prediction report line
pub const REPORT_PREDICTION_PREFIX: &str = "Predito: ";

/// Serial line once the engine is ready
pub const REPORT_WAITING: &str = "Aguardando dados...";

/// Serial line when a full frame has arrived
pub const REPORT_PROCESSING: &str = "Recebido. Processando...";

/// Serial line when engine init fails
pub const REPORT_INIT_FAILED: &str = "Erro tflm_init";

/// Serial line when inference fails
pub const REPORT_INFERENCE_FAILED: &str = "Erro IA";

/// Boot screen
pub const STATUS_BOOT: &str = "INICIANDO...";

/// Waiting-for-image screen
pub const STATUS_WAITING: &str = "AGUARDANDO\nDADOS PC...";

/// Shown when the first byte of a frame arrives
pub const STATUS_COLLECTING: &str = "RECEBENDO";

/// Shown while quantizing and running the network
pub const STATUS_PROCESSING: &str = "PROCESSANDO";

/// Engine init failure screen
pub const ERROR_INIT: &str = "ERRO TFLM";

/// Inference failure screen
pub const ERROR_INFERENCE: &str = "ERRO IA";

/// Header above the predicted digit
pub const PREDICTION_HEADER: &str = "PREDICAO:";
