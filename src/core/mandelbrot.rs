use crate::utils::error::{Result, ToolError};
use crate::utils::validation::Validate;

pub const DEFAULT_CENTER: (f64, f64) = (-0.75, 0.0);
pub const DEFAULT_PALETTE: &str = " .:-=+*#%@";

/// Region of the complex plane and the character grid it is sampled onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center_re: f64,
    pub center_im: f64,
    pub zoom: f64,
    pub width: usize,
    pub height: usize,
    pub max_iter: usize,
    /// Terminal cells are roughly twice as tall as they are wide.
    pub aspect_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center_re: DEFAULT_CENTER.0,
            center_im: DEFAULT_CENTER.1,
            zoom: 1.0,
            width: 80,
            height: 40,
            max_iter: 100,
            aspect_ratio: 2.0,
        }
    }
}

impl Validate for Viewport {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ToolError::validation("Width and height must be at least 1"));
        }
        if self.max_iter == 0 {
            return Err(ToolError::validation("Max iterations must be at least 1"));
        }
        if !(self.zoom > 0.0) || !self.zoom.is_finite() {
            return Err(ToolError::validation("Zoom must be greater than 0"));
        }
        Ok(())
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Index of the iteration on which |z|² first exceeds 4, or `None` if `c` stays bounded.
pub fn escape_iteration(c_re: f64, c_im: f64, max_iter: usize) -> Option<usize> {
    let (mut z_re, mut z_im) = (0.0f64, 0.0f64);
    for i in 0..max_iter {
        let next_re = z_re * z_re - z_im * z_im + c_re;
        z_im = 2.0 * z_re * z_im + c_im;
        z_re = next_re;
        if z_re * z_re + z_im * z_im > 4.0 {
            return Some(i);
        }
    }
    None
}

impl Viewport {
    pub fn real_radius(&self) -> f64 {
        1.5 / self.zoom
    }

    pub fn imag_radius(&self) -> f64 {
        (1.5 / self.aspect_ratio) * (self.height as f64 / self.width as f64) * 2.5 / self.zoom
    }

    /// Escape iterations, row-major, top row first.
    pub fn escape_grid(&self) -> Vec<Vec<Option<usize>>> {
        let (r, i) = (self.real_radius(), self.imag_radius());
        let re_vals = linspace(self.center_re - r, self.center_re + r, self.width);
        let im_vals = linspace(self.center_im - i, self.center_im + i, self.height);

        im_vals
            .iter()
            .map(|&im| {
                re_vals
                    .iter()
                    .map(|&re| escape_iteration(re, im, self.max_iter))
                    .collect()
            })
            .collect()
    }

    pub fn render(&self, palette: &str) -> String {
        let chars: Vec<char> = palette.chars().collect();
        self.escape_grid()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        Some(i) if !chars.is_empty() => chars[i % chars.len()],
                        _ => ' ',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn zoom_in(&mut self, factor: f64) -> Result<()> {
        check_factor(factor)?;
        self.zoom *= factor;
        Ok(())
    }

    pub fn zoom_out(&mut self, factor: f64) -> Result<()> {
        check_factor(factor)?;
        self.zoom /= factor;
        Ok(())
    }

    pub fn move_to(&mut self, re: f64, im: f64) {
        self.center_re = re;
        self.center_im = im;
    }

    pub fn resize(&mut self, width: usize, height: usize, max_iter: usize) -> Result<()> {
        let next = Viewport {
            width,
            height,
            max_iter,
            ..self.clone()
        };
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Restores center and zoom; resolution is kept.
    pub fn reset(&mut self) {
        self.center_re = DEFAULT_CENTER.0;
        self.center_im = DEFAULT_CENTER.1;
        self.zoom = 1.0;
    }

    pub fn title(&self) -> String {
        format!(
            "Mandelbrot Explorer | Zoom: {:.2e}x | Center: {:.5}{:+.5}i",
            self.zoom, self.center_re, self.center_im
        )
    }
}

fn check_factor(factor: f64) -> Result<()> {
    if !(factor > 0.0) || !factor.is_finite() {
        return Err(ToolError::validation("Zoom factor must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_iteration() {
        assert_eq!(escape_iteration(0.0, 0.0, 100), None);
        assert_eq!(escape_iteration(-1.0, 0.0, 100), None);
        // z1 = 2, z2 = 6
        assert_eq!(escape_iteration(2.0, 0.0, 100), Some(1));
        assert_eq!(escape_iteration(3.0, 0.0, 100), Some(0));
    }

    #[test]
    fn test_linspace_is_inclusive() {
        let v = linspace(-1.0, 1.0, 5);
        assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
    }

    #[test]
    fn test_default_radii() {
        let vp = Viewport::default();
        assert_eq!(vp.real_radius(), 1.5);
        assert!((vp.imag_radius() - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_render_dimensions_and_interior() {
        let vp = Viewport::default();
        let art = vp.render(DEFAULT_PALETTE);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 40);
        assert!(lines.iter().all(|l| l.chars().count() == 80));
        assert!(art.chars().any(|c| c != ' ' && c != '\n'));
    }

    #[test]
    fn test_single_cell_at_origin_is_blank() {
        let vp = Viewport {
            center_re: 0.0,
            center_im: 0.0,
            zoom: 1e9,
            width: 1,
            height: 1,
            ..Viewport::default()
        };
        assert_eq!(vp.render(DEFAULT_PALETTE), " ");
    }

    #[test]
    fn test_palette_wraps_by_iteration() {
        let vp = Viewport {
            center_re: 3.0,
            center_im: 0.0,
            zoom: 1e9,
            width: 1,
            height: 1,
            ..Viewport::default()
        };
        assert_eq!(vp.render("ab"), "a");
        let vp = Viewport {
            center_re: 2.0,
            ..vp
        };
        assert_eq!(vp.render("ab"), "b");
    }

    #[test]
    fn test_navigation() {
        let mut vp = Viewport::default();
        vp.zoom_in(4.0).unwrap();
        vp.zoom_out(2.0).unwrap();
        assert_eq!(vp.zoom, 2.0);
        assert!(vp.zoom_in(0.0).is_err());

        vp.move_to(0.25, -0.5);
        assert!(vp.resize(0, 10, 50).is_err());
        vp.resize(40, 20, 50).unwrap();
        vp.reset();
        assert_eq!((vp.center_re, vp.center_im, vp.zoom), (-0.75, 0.0, 1.0));
        assert_eq!((vp.width, vp.height, vp.max_iter), (40, 20, 50));
    }
}
