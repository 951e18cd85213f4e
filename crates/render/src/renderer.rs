use foundation::color::Rgba;
use foundation::math::Vec2;
use scene::camera::CameraState;
use scene::config::{ProjectionConfig, SphereConfig};
use scene::files::FileRef;
use scene::points::Point;
use scene::projection::{ProjectedPoint, project_and_sort};
use serde::Serialize;
use streaming::ImageCache;

use crate::glass::{GlassOutcome, draw_glass_sphere};
use crate::style::RenderStyle;
use crate::surface::{Paint, Shadow, Surface};

/// Per-frame counters.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub points: usize,
    pub drawn: usize,
    pub culled: usize,
    pub images: usize,
    pub image_fallbacks: usize,
    pub links: usize,
    pub labels: usize,
}

/// Draws the point-cloud sphere back to front onto a [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SphereRenderer {
    pub projection: ProjectionConfig,
    /// Sphere radius; depth fades are normalized against it.
    pub sphere_radius: f64,
    pub style: RenderStyle,
}

impl Default for SphereRenderer {
    fn default() -> Self {
        Self::new(&SphereConfig::default(), RenderStyle::default())
    }
}

impl SphereRenderer {
    pub fn new(config: &SphereConfig, style: RenderStyle) -> Self {
        Self {
            projection: config.projection.clone(),
            sphere_radius: config.generator.radius,
            style,
        }
    }

    /// Render one full frame.
    ///
    /// The surface is cleared and its current size defines the projection
    /// center. Nothing here fails: undrawable bitmaps are replaced by a flat
    /// fill and counted in [`FrameStats::image_fallbacks`].
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        points: &[Point],
        files: &[FileRef],
        camera: &CameraState,
        images: &ImageCache<S::Image>,
    ) -> FrameStats {
        surface.clear();
        let center = surface.size() * 0.5;

        let projected = project_and_sort(points, camera, center, &self.projection);
        let mut stats = FrameStats {
            points: points.len(),
            culled: points.len() - projected.len(),
            ..FrameStats::default()
        };

        for p in &projected {
            let point = &points[p.index];
            self.draw_point(surface, p, point, files, images, center, &mut stats);
        }

        stats
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_point<S: Surface>(
        &self,
        surface: &mut S,
        p: &ProjectedPoint,
        point: &Point,
        files: &[FileRef],
        images: &ImageCache<S::Image>,
        center: Vec2,
        stats: &mut FrameStats,
    ) {
        let file = point.file.and_then(|i| files.get(i));
        let color = self.style.palette.color(point.category);
        let radius = self
            .style
            .point_radius(point.category, file.is_some(), p.scale);

        if file.is_some() {
            let alpha = self.style.links.alpha(p.rotated.z, self.sphere_radius);
            surface.line(
                center,
                p.screen,
                self.style.links.width_px,
                &Paint::solid(color.with_alpha(alpha)),
            );
            stats.links += 1;
        }

        let bitmap = file
            .filter(|f| f.is_image())
            .and_then(|f| images.ready(&f.id));

        match bitmap {
            Some(image) => {
                let outcome = draw_glass_sphere(
                    surface,
                    image,
                    p.screen,
                    radius,
                    p.scale,
                    &self.style.glass,
                    self.style.palette.image_fallback,
                );
                match outcome {
                    GlassOutcome::Image => stats.images += 1,
                    GlassOutcome::Fallback => stats.image_fallbacks += 1,
                }
            }
            None => self.draw_dot(surface, p, radius, color, file.is_some()),
        }

        if let Some(file) = file {
            if let Some(label) =
                self.style
                    .labels
                    .place(p, &file.name, radius, self.sphere_radius)
            {
                let font = self.style.labels.font(label.font_size_px);
                surface.fill_text(&label.text, label.anchor_px, &font, label.color);
                stats.labels += 1;
            }
        }

        stats.drawn += 1;
    }

    fn draw_dot<S: Surface>(
        &self,
        surface: &mut S,
        p: &ProjectedPoint,
        radius: f64,
        color: Rgba,
        glow: bool,
    ) {
        let paint = Paint::solid(color);
        if !glow {
            surface.fill_circle(p.screen, radius, &paint);
            return;
        }

        surface.save();
        surface.set_shadow(Some(Shadow {
            color,
            blur_px: self.style.glow_blur_px * p.scale,
            offset_px: Vec2::ZERO,
        }));
        surface.fill_circle(p.screen, radius, &paint);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameStats, SphereRenderer};
    use crate::recording::{DrawCommand, RecordedImage, RecordingSurface};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use scene::camera::CameraState;
    use scene::config::SphereConfig;
    use scene::files::FileRef;
    use scene::points::{Point, generate_points};
    use scene::projection::project_and_sort;
    use streaming::{ImageCache, LoadProbe};

    fn points_for(files: &[FileRef]) -> Vec<Point> {
        generate_points(
            files,
            &SphereConfig::default().generator,
            &mut SmallRng::seed_from_u64(4),
        )
    }

    fn count(cmds: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        cmds.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn empty_file_list_draws_plain_filler_sphere() {
        let renderer = SphereRenderer::default();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let points = points_for(&[]);
        let stats = renderer.render(
            &mut surface,
            &points,
            &[],
            &CameraState::default(),
            &ImageCache::new(),
        );

        assert_eq!(
            stats,
            FrameStats {
                points: 150,
                drawn: 150,
                ..FrameStats::default()
            }
        );
        let cmds = surface.commands();
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::FillCircle { .. })), 150);
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::Line { .. })), 0);
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::SetShadow { .. })), 0);
    }

    #[test]
    fn link_is_drawn_before_its_point() {
        let files = vec![FileRef::new("a", "a.pdf", "application/pdf")];
        let points = points_for(&files);
        let renderer = SphereRenderer::default();
        let mut surface = RecordingSurface::new(400.0, 400.0);
        renderer.render(
            &mut surface,
            &points,
            &files,
            &CameraState::default(),
            &ImageCache::new(),
        );

        let cmds = surface.commands();
        let line_at = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        let DrawCommand::Line { from, to, .. } = &cmds[line_at] else {
            unreachable!()
        };
        assert_eq!(*from, Vec2::new(200.0, 200.0));
        // Glow shadow, then the dot itself at the line's far end.
        let dot = cmds[line_at..]
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .unwrap();
        assert_eq!(dot, *to);
        assert!(matches!(cmds[line_at + 2], DrawCommand::SetShadow { shadow: Some(_) }));
    }

    #[test]
    fn resident_image_uses_glass_path() {
        let files = vec![FileRef::new("img", "photo.png", "image/png").with_content("data:x")];
        let points = points_for(&files);
        let mut images = ImageCache::new();
        images.request("img", || Ok::<_, String>(RecordedImage::new("data:x")));
        images.poll(|_| LoadProbe::Ready);

        let mut surface = RecordingSurface::new(640.0, 480.0);
        let stats = SphereRenderer::default().render(
            &mut surface,
            &points,
            &files,
            &CameraState::default(),
            &images,
        );

        assert_eq!(stats.images, 1);
        assert_eq!(stats.image_fallbacks, 0);
        let cmds = surface.commands();
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::DrawImage { .. })), 1);
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::ClipCircle { .. })), 1);
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::StrokeCircle { .. })), 1);
        assert_eq!(count(cmds, |c| matches!(c, DrawCommand::FillEllipse { .. })), 1);
        let saves = count(cmds, |c| matches!(c, DrawCommand::Save));
        let restores = count(cmds, |c| matches!(c, DrawCommand::Restore));
        assert_eq!(saves, restores);
    }

    #[test]
    fn undrawable_image_falls_back_to_flat_fill() {
        let files = vec![FileRef::new("img", "photo.png", "image/png")];
        let points = points_for(&files);
        let mut images = ImageCache::new();
        images.request("img", || Ok::<_, String>(RecordedImage::broken("data:x")));
        images.mark_resident("img").unwrap();

        let mut surface = RecordingSurface::new(640.0, 480.0);
        let stats = SphereRenderer::default().render(
            &mut surface,
            &points,
            &files,
            &CameraState::default(),
            &images,
        );
        assert_eq!(stats.images, 0);
        assert_eq!(stats.image_fallbacks, 1);
        assert_eq!(stats.drawn, points.len());
        assert_eq!(
            count(surface.commands(), |c| matches!(c, DrawCommand::DrawImage { .. })),
            0
        );
    }

    #[test]
    fn loading_image_is_drawn_as_a_dot() {
        let files = vec![FileRef::new("img", "photo.png", "image/png")];
        let points = points_for(&files);
        let mut images = ImageCache::new();
        images.request("img", || Ok::<_, String>(RecordedImage::new("data:x")));

        let mut surface = RecordingSurface::new(640.0, 480.0);
        let stats = SphereRenderer::default().render(
            &mut surface,
            &points,
            &files,
            &CameraState::default(),
            &images,
        );
        assert_eq!(stats.images + stats.image_fallbacks, 0);
        assert_eq!(
            count(surface.commands(), |c| matches!(c, DrawCommand::ClipCircle { .. })),
            0
        );
    }

    #[test]
    fn labels_only_for_front_file_points() {
        let files: Vec<FileRef> = (0..40)
            .map(|i| {
                FileRef::new(format!("{i}"), format!("document-number-{i}.txt"), "text/plain")
            })
            .collect();
        let points = points_for(&files);
        let camera = CameraState::default();
        let renderer = SphereRenderer::default();
        let mut surface = RecordingSurface::new(800.0, 800.0);
        let stats = renderer.render(&mut surface, &points, &files, &camera, &ImageCache::new());

        let center = Vec2::new(400.0, 400.0);
        let expected = project_and_sort(&points, &camera, center, &renderer.projection)
            .iter()
            .filter(|p| points[p.index].file.is_some() && p.rotated.z > -50.0)
            .count();
        assert!(expected > 0 && expected < files.len());
        assert_eq!(stats.labels, expected);
        assert_eq!(stats.links, files.len());

        for cmd in surface.commands() {
            if let DrawCommand::FillText { text, .. } = cmd {
                assert!(text.ends_with("..."));
                assert_eq!(text.chars().count(), 13);
            }
        }
    }

    #[test]
    fn zero_sized_surface_still_completes() {
        let points = points_for(&[]);
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let stats = SphereRenderer::default().render(
            &mut surface,
            &points,
            &[],
            &CameraState::default(),
            &ImageCache::new(),
        );
        assert_eq!(stats.drawn, 150);
    }
}
