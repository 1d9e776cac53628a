//! TensorFlow Lite Micro engine
//!
//! Binds the C wrapper around the TFLM interpreter (`libtflm_wrapper.a`,
//! linked by `build.rs`). The wrapper owns the model, the tensor arena and
//! the interpreter as globals, so only one [`TflmEngine`] may exist.

use core::ffi::c_int;
use core::sync::atomic::{AtomicBool, Ordering};

use numeral_core::traits::{EngineInitError, InferenceEngine, InferenceError};

mod ffi {
    use core::ffi::c_int;

    extern "C" {
        /// Build the interpreter and allocate tensors, 0 on success
        pub fn tflm_init() -> c_int;
        /// Input tensor data, byte count written to `bytes`
        pub fn tflm_input_ptr(bytes: *mut c_int) -> *mut i8;
        /// Output tensor data, byte count written to `bytes`
        pub fn tflm_output_ptr(bytes: *mut c_int) -> *mut i8;
        pub fn tflm_input_scale() -> f32;
        pub fn tflm_input_zero_point() -> c_int;
        /// Run one forward pass, 0 on success
        pub fn tflm_invoke() -> c_int;
    }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Tensor view handed out by the wrapper
#[derive(Clone, Copy)]
struct Tensor {
    ptr: *mut i8,
    len: usize,
}

impl Tensor {
    const EMPTY: Self = Self {
        ptr: core::ptr::null_mut(),
        len: 0,
    };

    fn from_raw(ptr: *mut i8, bytes: c_int) -> Self {
        if ptr.is_null() || bytes <= 0 {
            return Self::EMPTY;
        }
        Self {
            ptr,
            len: bytes as usize,
        }
    }
}

/// Handle to the TFLM interpreter
pub struct TflmEngine {
    input: Tensor,
    output: Tensor,
    ready: bool,
}

impl TflmEngine {
    /// Claim the interpreter, `None` if already claimed
    pub fn take() -> Option<Self> {
        let claimed = cortex_m::interrupt::free(|_| {
            if TAKEN.load(Ordering::Relaxed) {
                false
            } else {
                TAKEN.store(true, Ordering::Relaxed);
                true
            }
        });

        claimed.then_some(Self {
            input: Tensor::EMPTY,
            output: Tensor::EMPTY,
            ready: false,
        })
    }
}

impl InferenceEngine for TflmEngine {
    fn init(&mut self) -> Result<(), EngineInitError> {
        // SAFETY: the wrapper is only driven through this handle, which is unique
        let status = unsafe { ffi::tflm_init() };
        if status != 0 {
            return Err(EngineInitError::Backend(status));
        }

        let mut in_bytes: c_int = 0;
        let mut out_bytes: c_int = 0;
        // SAFETY: init succeeded, so both tensors are allocated in the arena
        let (input, output) = unsafe {
            (
                ffi::tflm_input_ptr(&mut in_bytes),
                ffi::tflm_output_ptr(&mut out_bytes),
            )
        };
        self.input = Tensor::from_raw(input, in_bytes);
        self.output = Tensor::from_raw(output, out_bytes);
        self.ready = true;
        Ok(())
    }

    fn input_mut(&mut self) -> &mut [i8] {
        if self.input.ptr.is_null() {
            return &mut [];
        }
        // SAFETY: the arena outlives the program and `&mut self` is the only
        // path to the input tensor
        unsafe { core::slice::from_raw_parts_mut(self.input.ptr, self.input.len) }
    }

    fn output(&self) -> &[i8] {
        if self.output.ptr.is_null() {
            return &[];
        }
        // SAFETY: only `invoke` writes the output tensor, and it takes `&mut self`
        unsafe { core::slice::from_raw_parts(self.output.ptr, self.output.len) }
    }

    fn input_scale(&self) -> f32 {
        if !self.ready {
            return 0.0;
        }
        // SAFETY: plain getter on an initialized interpreter
        unsafe { ffi::tflm_input_scale() }
    }

    fn input_zero_point(&self) -> i32 {
        if !self.ready {
            return 0;
        }
        // SAFETY: plain getter on an initialized interpreter
        unsafe { ffi::tflm_input_zero_point() as i32 }
    }

    fn invoke(&mut self) -> Result<(), InferenceError> {
        if !self.ready {
            return Err(InferenceError::Backend(-1));
        }
        // SAFETY: interpreter initialized; the input view borrow ended before
        // this `&mut self` call
        let status = unsafe { ffi::tflm_invoke() };
        if status != 0 {
            return Err(InferenceError::Backend(status));
        }
        Ok(())
    }
}
