//! Root of the overlay tree
//!
//! The application is a horizontal, resizable container. After the tree has
//! rendered it registers one more pointer region covering the whole surface;
//! registered last, it only owns the pointer when no panel region does, and
//! then asks for the default cursor.

use crate::component::{Lineage, Renderable};
use crate::config::OverlayConfig;
use crate::geometry::{Orientation, Rect};
use crate::panel::{LayoutMetrics, PanelContainer};
use crate::panels::{
    Console, ConsoleBuffer, EntityMap, EntitySource, FrameSource, HostInput, HostView,
};
use crate::pointer::PointerCapture;
use crate::surface::{CursorKind, Surface};
use crate::tracing::LayoutSnapshot;

pub struct Application {
    root: PanelContainer,
    capture: PointerCapture,
}

impl Application {
    pub const KIND: &'static str = "application";

    /// An empty root; children are added through [`Application::root_mut`]
    pub fn new(metrics: LayoutMetrics) -> Self {
        let root = PanelContainer::new(Lineage::root(), Orientation::Horizontal, true, metrics)
            .with_kind(Self::KIND);
        Self {
            root,
            capture: PointerCapture::new(),
        }
    }

    /// The standard overlay: host view beside a column of entity map over console
    pub fn with_default_panels<H, E>(
        config: &OverlayConfig,
        host: H,
        entities: E,
        console: ConsoleBuffer,
    ) -> Self
    where
        H: HostInput + FrameSource + 'static,
        E: EntitySource + 'static,
    {
        let metrics = config.layout;
        let mut app = Self::new(metrics);

        app.root.add_child(|lineage| HostView::new(lineage, host));
        app.root.add_child(|lineage| {
            let mut controller =
                PanelContainer::new(lineage, Orientation::Vertical, true, metrics);
            controller.add_child(|lineage| EntityMap::new(lineage, entities));
            controller.add_child(|lineage| Console::new(lineage, console));
            controller
        });
        app.root.resize_children(&config.host_split);

        tracing::debug!(sizes = ?app.root.sizes(), "default panels created");
        app
    }

    pub fn root(&self) -> &PanelContainer {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut PanelContainer {
        &mut self.root
    }

    /// Record of the full-surface fallback region
    pub fn fallback_capture(&self) -> &PointerCapture {
        &self.capture
    }

    /// Render one frame of the whole tree at `width` x `height`
    pub fn frame(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        let before = LayoutSnapshot::from_container(&self.root);

        self.root.render(surface, width, height);
        if surface.mouse(&mut self.capture, Rect::sized(width, height)) {
            surface.cursor(CursorKind::Default);
        }

        let after = LayoutSnapshot::from_container(&self.root);
        if let Some(change) = before.diff(&after) {
            tracing::debug!("root layout: {}", change);
        }
    }
}

impl Renderable for Application {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn lineage(&self) -> &Lineage {
        self.root.lineage()
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        self.frame(surface, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{NoHost, StaticEntities};

    #[test]
    fn test_default_panels_layout() {
        let app = Application::with_default_panels(
            &OverlayConfig::default(),
            NoHost,
            StaticEntities::default(),
            ConsoleBuffer::new(),
        );
        assert_eq!(app.root().sizes(), vec![3, 1]);
        assert_eq!(app.root().kind(), Application::KIND);
        assert!(app.root().is_resizable());

        let controller = app.root().slots()[1].child();
        assert_eq!(controller.kind(), PanelContainer::KIND);
        assert_eq!(controller.lineage().path().indices(), &[1]);
        assert_eq!(
            controller.lineage().parent().map(|a| a.kind),
            Some(Application::KIND)
        );
    }

    #[test]
    fn test_custom_split() {
        let config = OverlayConfig {
            host_split: vec![1, 1],
            ..Default::default()
        };
        let app = Application::with_default_panels(
            &config,
            NoHost,
            StaticEntities::default(),
            ConsoleBuffer::new(),
        );
        assert_eq!(app.root().sizes(), vec![1, 1]);
    }
}
