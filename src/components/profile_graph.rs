// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Motion profile graph widget
//!
//! Plots the downsampled velocity, acceleration, and jerk series against
//! time. Velocity scales to its own value axis; acceleration and jerk share
//! a second one, so the widget normalizes each group by its own peak. The
//! buffers arrive pre-downsampled from [`crate::graph::ProfileSeries`]; the
//! widget only scales and strokes them.

use crate::graph::ProfileSeries;
use crate::theme;
use kurbo::{Affine, BezPath, Line, Point, Stroke};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, LayoutCtx, NoAction, PaintCtx, PropertiesMut,
    PropertiesRef, RegisterCtx, Update, UpdateCtx, Widget,
};
use masonry::kurbo::Size;
use masonry::util::fill_color;
use masonry::vello::Scene;
use masonry::vello::peniko::Brush;
use std::marker::PhantomData;
use std::sync::Arc;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Inset between the widget edge and the plot area.
const PLOT_MARGIN: f64 = 8.0;

/// A widget that renders the three profile series
pub struct ProfileGraphWidget {
    series: Arc<ProfileSeries>,
    size: Size,
}

impl ProfileGraphWidget {
    pub fn new(series: Arc<ProfileSeries>) -> Self {
        Self {
            series,
            size: Size::new(400.0, 180.0),
        }
    }

    pub fn set_series(&mut self, series: Arc<ProfileSeries>) {
        self.series = series;
    }

    /// Map one series into plot pixels and stroke it.
    ///
    /// `peak` is the value that maps to the full half-height of the plot;
    /// values are centered on the vertical midline so signed series
    /// (acceleration, jerk) read naturally.
    fn stroke_series(
        &self,
        scene: &mut Scene,
        points: &[(f64, f64)],
        peak: f64,
        color: masonry::vello::peniko::Color,
        width: f64,
    ) {
        if points.len() < 2 || peak <= 0.0 {
            return;
        }

        let plot_w = self.size.width - 2.0 * PLOT_MARGIN;
        let plot_h = self.size.height - 2.0 * PLOT_MARGIN;
        let time_span = self.series.time_span().max(f64::EPSILON);
        let mid_y = PLOT_MARGIN + plot_h / 2.0;

        let mut path = BezPath::new();
        for (i, &(t, v)) in points.iter().enumerate() {
            let x = PLOT_MARGIN + (t / time_span) * plot_w;
            let y = mid_y - (v / peak) * (plot_h / 2.0);
            if i == 0 {
                path.move_to(Point::new(x, y));
            } else {
                path.line_to(Point::new(x, y));
            }
        }

        let stroke = Stroke::new(width);
        let brush = Brush::Solid(color);
        scene.stroke(&stroke, Affine::IDENTITY, &brush, None, &path);
    }
}

impl Widget for ProfileGraphWidget {
    type Action = NoAction;

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
        // No state to update
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let size = bc.max();
        self.size = size;
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let size = ctx.size();
        self.size = size;

        fill_color(scene, &size.to_rect(), theme::graph::BACKGROUND);

        // Midline = zero for the signed series
        let mid_y = size.height / 2.0;
        let midline = Line::new(Point::new(0.0, mid_y), Point::new(size.width, mid_y));
        scene.stroke(
            &Stroke::new(1.0),
            Affine::IDENTITY,
            &Brush::Solid(theme::graph::AXIS),
            None,
            &midline,
        );

        if self.series.is_empty() {
            return;
        }

        self.stroke_series(
            scene,
            &self.series.acceleration,
            self.series.accel_jerk_peak(),
            theme::graph::ACCELERATION,
            theme::size::GRAPH_LINE_WIDTH,
        );
        self.stroke_series(
            scene,
            &self.series.jerk,
            self.series.accel_jerk_peak(),
            theme::graph::JERK,
            theme::size::GRAPH_LINE_WIDTH,
        );
        self.stroke_series(
            scene,
            &self.series.velocity,
            self.series.velocity_peak(),
            theme::graph::VELOCITY,
            theme::size::GRAPH_VELOCITY_WIDTH,
        );
    }

    fn accessibility_role(&self) -> Role {
        Role::Image
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_label(format!("Motion profile, {} samples", self.series.len()));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}

// ===== Xilem View Wrapper =====

/// Create a profile graph view from downsampled series buffers
pub fn profile_graph_view<State>(series: Arc<ProfileSeries>) -> ProfileGraphView<State> {
    ProfileGraphView {
        series,
        phantom: PhantomData,
    }
}

/// The Xilem View for ProfileGraphWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct ProfileGraphView<State> {
    series: Arc<ProfileSeries>,
    phantom: PhantomData<fn() -> State>,
}

impl<State> ViewMarker for ProfileGraphView<State> {}

impl<State: 'static> View<State, (), ViewCtx> for ProfileGraphView<State> {
    type Element = Pod<ProfileGraphWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = ProfileGraphWidget::new(self.series.clone());
        (ctx.create_pod(widget), ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        if !Arc::ptr_eq(&self.series, &prev.series) {
            let mut widget = element.downcast::<ProfileGraphWidget>();
            widget.widget.set_series(self.series.clone());
            widget.ctx.request_render();
        }
    }

    fn teardown(
        &self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        _element: Mut<'_, Self::Element>,
    ) {
        // No cleanup needed
    }

    fn message(
        &self,
        _view_state: &mut Self::ViewState,
        _message: &mut MessageContext,
        _element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) -> MessageResult<()> {
        MessageResult::Stale
    }
}
