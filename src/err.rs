/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::Domain;
use std::error::Error;
use std::fmt::Formatter;

#[derive(Clone, Debug)]
pub enum GaugeError {
    OutOfMemory(usize),
    InvalidBufferLength(usize, usize),
    UnsupportedSize {
        backend: &'static str,
        n: usize,
        domain: Domain,
    },
    ZeroSizedFft,
    Kernel(String),
    Report(String),
    UnknownBackend(String),
}

impl Error for GaugeError {}

impl std::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GaugeError::OutOfMemory(length) => {
                f.write_fmt(format_args!("Cannot allocate {length} elements to vector"))
            }
            GaugeError::InvalidBufferLength(s0, s1) => f.write_fmt(format_args!(
                "Buffer length expected to be {s0}, but it was {s1}"
            )),
            GaugeError::UnsupportedSize { backend, n, domain } => f.write_fmt(format_args!(
                "{backend} does not support {} transforms of size {n}",
                domain.label()
            )),
            GaugeError::ZeroSizedFft => f.write_str("Cannot execute FFT on zero-sized buffers"),
            GaugeError::Kernel(message) => {
                f.write_fmt(format_args!("FFT kernel failed: {message}"))
            }
            GaugeError::Report(message) => {
                f.write_fmt(format_args!("Cannot write report: {message}"))
            }
            GaugeError::UnknownBackend(name) => {
                f.write_fmt(format_args!("Unknown backend \"{name}\""))
            }
        }
    }
}

impl From<std::io::Error> for GaugeError {
    fn from(value: std::io::Error) -> Self {
        GaugeError::Report(value.to_string())
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::err::GaugeError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;

/// Rejects a buffer whose length differs from what the plan was built for.
pub(crate) fn check_length(expected: usize, actual: usize) -> Result<(), GaugeError> {
    if expected != actual {
        return Err(GaugeError::InvalidBufferLength(expected, actual));
    }
    Ok(())
}
