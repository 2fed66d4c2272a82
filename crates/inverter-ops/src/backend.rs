//! Execution backend selection.
//!
//! Every transform in this crate is either an independent per-pixel map or
//! a commutative reduction, so the serial and parallel backends produce
//! identical results. The choice only affects throughput.

use inverter_core::{Error, Image, PixelFormat, Result, CHANNELS};

/// Backend used to run per-pixel work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Backend {
    /// Best available (parallel when compiled in).
    #[default]
    Auto,
    /// Single thread, pixel by pixel.
    Serial,
    /// Rows distributed over the rayon thread pool.
    Parallel,
}

impl Backend {
    /// Check if this backend is available in the current build.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Auto | Self::Serial => true,
            Self::Parallel => cfg!(feature = "parallel"),
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Serial => "serial",
            Self::Parallel => "parallel",
        }
    }

    /// Parses a backend name as accepted by [`name`](Self::name).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "serial" | "cpu" => Ok(Self::Serial),
            "parallel" | "rayon" => Ok(Self::Parallel),
            other => Err(Error::filter_unavailable(format!("backend '{other}'"))),
        }
    }

    /// Resolves [`Auto`](Self::Auto) to a concrete backend.
    ///
    /// # Errors
    ///
    /// [`Error::FilterUnavailable`] if the requested backend was not compiled in.
    pub fn resolve(self) -> Result<Self> {
        match self {
            Self::Auto if cfg!(feature = "parallel") => Ok(Self::Parallel),
            Self::Auto => Ok(Self::Serial),
            b if b.is_available() => Ok(b),
            b => Err(Error::filter_unavailable(format!(
                "backend '{}' (built without the `parallel` feature)",
                b.name()
            ))),
        }
    }
}

/// Information about a backend.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Backend type.
    pub backend: Backend,
    /// Whether backend is available.
    pub available: bool,
    /// Description.
    pub description: &'static str,
}

/// Lists the concrete backends and whether each is compiled in.
pub fn detect_backends() -> Vec<BackendInfo> {
    vec![
        BackendInfo {
            backend: Backend::Parallel,
            available: Backend::Parallel.is_available(),
            description: "CPU rows in parallel via rayon",
        },
        BackendInfo {
            backend: Backend::Serial,
            available: true,
            description: "CPU single thread",
        },
    ]
}

/// Get description of available backends.
pub fn describe_backends() -> String {
    let mut desc = String::new();
    for info in detect_backends() {
        let status = if info.available { "+" } else { "-" };
        desc.push_str(&format!("[{}] {}: {}\n", status, info.backend.name(), info.description));
    }
    desc
}

/// Returns a copy of `image` with `f` applied to every `[R, G, B, A]` chunk.
///
/// `backend` must already be resolved.
pub(crate) fn map_pixels<T, F>(image: &Image<T>, backend: Backend, f: F) -> Image<T>
where
    T: PixelFormat,
    F: Fn(&mut [T]) + Send + Sync,
{
    let mut out = image.clone();
    out.make_mut();
    match backend {
        #[cfg(feature = "parallel")]
        Backend::Parallel => crate::parallel::for_each_pixel(&mut out, &f),
        _ => out.data_mut().chunks_exact_mut(CHANNELS).for_each(f),
    }
    out
}

/// Folds every pixel with `fold`, merging partial results with `merge`.
///
/// `merge` must be commutative and associative for the parallel path to
/// agree with the serial one.
pub(crate) fn fold_pixels<T, A, F, M>(image: &Image<T>, backend: Backend, init: A, fold: F, merge: M) -> A
where
    T: PixelFormat,
    A: Copy + Send + Sync,
    F: Fn(A, &[T]) -> A + Send + Sync,
    M: Fn(A, A) -> A + Send + Sync,
{
    match backend {
        #[cfg(feature = "parallel")]
        Backend::Parallel => crate::parallel::fold_pixels(image, init, &fold, &merge),
        _ => (0..image.height())
            .map(|y| image.row(y).chunks_exact(CHANNELS).fold(init, &fold))
            .fold(init, &merge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolves_to_concrete() {
        let resolved = Backend::Auto.resolve().unwrap();
        assert_ne!(resolved, Backend::Auto);
        assert!(resolved.is_available());
    }

    #[test]
    fn test_serial_always_available() {
        assert_eq!(Backend::Serial.resolve().unwrap(), Backend::Serial);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_parallel_unavailable_without_feature() {
        let err = Backend::Parallel.resolve().unwrap_err();
        assert_eq!(err.kind(), inverter_core::ErrorKind::FilterUnavailable);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Backend::from_name("Serial").unwrap(), Backend::Serial);
        assert_eq!(Backend::from_name("rayon").unwrap(), Backend::Parallel);
        assert!(Backend::from_name("cuda").is_err());
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let data: Vec<f32> = (0..37 * 11 * 4).map(|i| (i % 97) as f32 / 96.0).collect();
        let img = Image::from_data(37, 11, data).unwrap();
        let backend = Backend::Auto.resolve().unwrap();

        let a = map_pixels(&img, Backend::Serial, |px| px[0] = 1.0 - px[0]);
        let b = map_pixels(&img, backend, |px| px[0] = 1.0 - px[0]);
        assert_eq!(a, b);

        let sum_serial = fold_pixels(&img, Backend::Serial, 0u64, |n, px| n + (px[1] > 0.5) as u64, |a, b| a + b);
        let sum_auto = fold_pixels(&img, backend, 0u64, |n, px| n + (px[1] > 0.5) as u64, |a, b| a + b);
        assert_eq!(sum_serial, sum_auto);
    }

    #[test]
    fn test_serial_fold_merges_rows() {
        let img: Image<u8> = Image::filled(5, 3, [1, 2, 3, 4]);
        let (pixels, merges) = fold_pixels(
            &img,
            Backend::Serial,
            (0u64, 0u64),
            |(n, m), _px| (n + 1, m),
            |a, b| (a.0 + b.0, a.1 + b.1 + 1),
        );
        assert_eq!(pixels, 15);
        assert_eq!(merges, 3);
    }

    #[test]
    fn test_describe_backends() {
        let desc = describe_backends();
        assert!(desc.contains("serial"));
        assert!(desc.contains("parallel"));
    }
}
