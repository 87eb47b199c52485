/// Chart layer: linear scales and the per-selection projection.
///
/// ```text
///   &[Record] + selection ──► project() ──► Projection { points, line, scales }
/// ```

pub mod projection;
pub mod scale;
