//! Стандартизация признаков

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};

use crate::error::{PrepError, Result};

/// (x - mean) / std по столбцам, std популяционное (ddof = 0).
/// Статистики считаются на столбцах, делённых на max|x|, чтобы сумма и
/// дисперсия не переполнялись. Константные столбцы переводятся в 0.
pub struct StandardScaler {
    /// max|x| по столбцу (1, если столбец нулевой)
    scale: Option<Array1<f64>>,
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
    constant: Vec<bool>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            scale: None,
            mean: None,
            std: None,
            constant: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.scale.is_some() && self.mean.is_some() && self.std.is_some()
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<()> {
        if X.nrows() == 0 {
            return Err(PrepError::invalid("empty dataset"));
        }

        let scale = X.map_axis(Axis(0), |col| {
            let max = col.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if max > 0.0 && max.is_finite() {
                max
            } else {
                1.0
            }
        });
        let Xs = X / &scale;

        let mean = Xs
            .mean_axis(Axis(0))
            .ok_or_else(|| PrepError::invalid("failed to compute mean"))?;
        let mut std = Xs.std_axis(Axis(0), 0.0);

        // Константный столбец: все значения совпадают
        self.constant = X
            .columns()
            .into_iter()
            .zip(std.iter())
            .map(|(col, s)| *s == 0.0 || col.iter().all(|v| *v == col[0]))
            .collect();

        // Избегаем деления на ноль
        for (val, constant) in std.iter_mut().zip(&self.constant) {
            if *constant {
                *val = 1.0;
            }
        }

        self.scale = Some(scale);
        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>> {
        let (scale, mean, std) = match (&self.scale, &self.mean, &self.std) {
            (Some(scale), Some(mean), Some(std)) => (scale, mean, std),
            _ => return Err(PrepError::invalid("scaler not fitted")),
        };
        if X.ncols() != mean.len() {
            return Err(PrepError::invalid(format!(
                "expected {} features, got {}",
                mean.len(),
                X.ncols()
            )));
        }

        let mut scaled = X.clone();
        for mut row in scaled.rows_mut() {
            for (i, val) in row.iter_mut().enumerate() {
                *val = if self.constant[i] {
                    0.0
                } else {
                    (*val / scale[i] - mean[i]) / std[i]
                };
            }
        }

        Ok(scaled)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(X)?;
        self.transform(X)
    }

    /// (mean, std, constant) по каждому столбцу в исходном масштабе. Для константных std = 0
    pub fn params(&self) -> Vec<(f64, f64, bool)> {
        match (&self.scale, &self.mean, &self.std) {
            (Some(scale), Some(mean), Some(std)) => scale
                .iter()
                .zip(mean.iter())
                .zip(std.iter())
                .zip(&self.constant)
                .map(|(((k, m), s), c)| (m * k, if *c { 0.0 } else { s * k }, *c))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}
