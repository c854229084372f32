use crate::{error::IncompatibleVectorError, vectorizer::Weight};

/// Vector comparison over TF-IDF vectors built against the same corpus index.
pub trait Compare<N>
where
    N: Weight,
{
    /// dot積
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &[N], other: &[N]) -> Result<f64, IncompatibleVectorError>;
    /// L2 norm
    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(vec: &[N]) -> f64;
    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0.0 when either vector is all zero
    fn cosine_similarity(vec: &[N], other: &[N]) -> Result<f64, IncompatibleVectorError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

#[inline]
fn check_len<N>(vec: &[N], other: &[N]) -> Result<(), IncompatibleVectorError> {
    if vec.len() != other.len() {
        return Err(IncompatibleVectorError::Length {
            left: vec.len(),
            right: other.len(),
        });
    }
    Ok(())
}

/// Accumulation is done in f64 whatever the storage type is.
impl<N> Compare<N> for DefaultCompare
where
    N: Weight,
{
    #[inline]
    fn dot(vec: &[N], other: &[N]) -> Result<f64, IncompatibleVectorError> {
        check_len(vec, other)?;
        Ok(vec
            .iter()
            .zip(other)
            .map(|(&a, &b)| {
                let (a, b): (f64, f64) = (a.into(), b.into());
                a * b
            })
            .sum())
    }

    #[inline]
    fn norm(vec: &[N]) -> f64 {
        vec.iter()
            .map(|&a| {
                let a: f64 = a.into();
                a * a
            })
            .sum::<f64>()
            .sqrt()
    }

    fn cosine_similarity(vec: &[N], other: &[N]) -> Result<f64, IncompatibleVectorError> {
        check_len(vec, other)?;
        let mut dot = 0_f64;
        let mut norm_a = 0_f64;
        let mut norm_b = 0_f64;
        for (&a, &b) in vec.iter().zip(other) {
            let (a, b): (f64, f64) = (a.into(), b.into());
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        let denominator = norm_a.sqrt() * norm_b.sqrt();
        if denominator == 0.0 {
            Ok(0.0)
        } else {
            Ok(dot / denominator)
        }
    }
}
