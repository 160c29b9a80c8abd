// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Dual-handle time range selector.
//!
//! The slider turns pointer input on a one-row track into two bounded
//! endpoints and an optional seek position. All of the interaction logic
//! lives in the pure [`reduce`] function; [`RangeSlider`] only keeps the
//! drag state, the props last supplied by its owner and the track geometry
//! recorded on the last render.
//!
//! Values are whole seconds. While a drag is in progress the slider holds
//! pointer capture, so the owner must route every mouse move and release to
//! it regardless of where the pointer is.

mod event;
mod render;

/// Which interaction, if any, the pointer is currently driving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DragState {
    #[default]
    None,
    DraggingStart,
    DraggingEnd,
    Seeking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Handle {
    Start,
    End,
}

/// What a pointer press landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PressTarget {
    StartHandle,
    EndHandle,
    Track,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SliderProps {
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) start_time: f64,
    pub(crate) end_time: f64,
    pub(crate) current_position: Option<f64>,
}

impl SliderProps {
    fn clamp_start(&self, v: f64) -> f64 {
        v.min(self.end_time - 1.0).max(self.min)
    }

    fn clamp_end(&self, v: f64) -> f64 {
        v.max(self.start_time + 1.0).min(self.max)
    }

    fn fraction_of(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Position of the track on screen.
///
/// `width` is the distance in columns from the first track column to the
/// last, so the track occupies `width + 1` cells and its last cell maps to
/// `max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TrackGeometry {
    pub(crate) left: u16,
    pub(crate) width: u16,
    pub(crate) row: u16,
}

impl TrackGeometry {
    pub(crate) fn value_at(&self, x: u16, props: &SliderProps) -> f64 {
        let fraction = if self.width == 0 {
            0.0
        } else {
            ((f64::from(x) - f64::from(self.left)) / f64::from(self.width)).clamp(0.0, 1.0)
        };
        (props.min + fraction * (props.max - props.min)).round()
    }

    pub(crate) fn column_of(&self, value: f64, props: &SliderProps) -> u16 {
        let offset = (props.fraction_of(value) * f64::from(self.width)).round();
        self.left.saturating_add(offset as u16)
    }

    /// A track that has not been drawn yet has no width and contains nothing.
    pub(crate) fn contains(&self, x: u16, y: u16) -> bool {
        self.width > 0 && y == self.row && x >= self.left && x <= self.left.saturating_add(self.width)
    }

    /// Presses within one column of a handle grab it. The nearer handle
    /// wins; on a tie the start handle wins unless the press is to its right.
    pub(crate) fn hit_test(&self, x: u16, props: &SliderProps) -> PressTarget {
        let start = self.column_of(props.start_time, props);
        let end = self.column_of(props.end_time, props);
        let to_start = x.abs_diff(start);
        let to_end = x.abs_diff(end);

        if to_start > 1 && to_end > 1 {
            return PressTarget::Track;
        }

        match to_start.cmp(&to_end) {
            std::cmp::Ordering::Less => PressTarget::StartHandle,
            std::cmp::Ordering::Greater => PressTarget::EndHandle,
            std::cmp::Ordering::Equal if x <= start => PressTarget::StartHandle,
            std::cmp::Ordering::Equal => PressTarget::EndHandle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PointerEvent {
    Down { x: u16, target: PressTarget },
    Move { x: u16 },
    Up,
    /// Keyboard adjustment of one handle by `delta` seconds.
    Nudge { handle: Handle, delta: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SliderEffect {
    StartChanged(f64),
    EndChanged(f64),
    Seek(f64),
    CapturePointer,
    ReleasePointer,
}

/// Applies one pointer event.
///
/// Emitted start values never pass `end - 1` or fall below `min`; emitted end
/// values never pass `max` or fall below `start + 1`. A press replaces any
/// drag already in progress.
pub(crate) fn reduce(
    state: DragState,
    props: &SliderProps,
    geometry: &TrackGeometry,
    event: PointerEvent,
) -> (DragState, Vec<SliderEffect>) {
    match event {
        PointerEvent::Down { x, target } => match target {
            PressTarget::StartHandle => (DragState::DraggingStart, vec![SliderEffect::CapturePointer]),
            PressTarget::EndHandle => (DragState::DraggingEnd, vec![SliderEffect::CapturePointer]),
            PressTarget::Track => (
                DragState::Seeking,
                vec![
                    SliderEffect::CapturePointer,
                    SliderEffect::Seek(geometry.value_at(x, props)),
                ],
            ),
        },

        PointerEvent::Move { x } => {
            let v = geometry.value_at(x, props);
            let effects = match state {
                DragState::None => vec![],
                DragState::DraggingStart => vec![SliderEffect::StartChanged(props.clamp_start(v))],
                DragState::DraggingEnd => vec![SliderEffect::EndChanged(props.clamp_end(v))],
                DragState::Seeking => vec![SliderEffect::Seek(v)],
            };
            (state, effects)
        }

        PointerEvent::Up => match state {
            DragState::None => (DragState::None, vec![]),
            _ => (DragState::None, vec![SliderEffect::ReleasePointer]),
        },

        PointerEvent::Nudge { handle, delta } => {
            let effect = match handle {
                Handle::Start => SliderEffect::StartChanged(props.clamp_start(props.start_time + delta)),
                Handle::End => SliderEffect::EndChanged(props.clamp_end(props.end_time + delta)),
            };
            (state, vec![effect])
        }
    }
}

pub(crate) struct RangeSlider {
    state: DragState,
    props: SliderProps,
    geometry: TrackGeometry,
    pub(crate) focused_handle: Handle,
}

impl RangeSlider {
    pub(crate) fn new(props: SliderProps) -> Self {
        Self {
            state: DragState::None,
            props,
            geometry: TrackGeometry::default(),
            focused_handle: Handle::Start,
        }
    }

    pub(crate) fn props(&self) -> &SliderProps {
        &self.props
    }

    pub(crate) fn set_props(&mut self, props: SliderProps) {
        self.props = props;
    }

    pub(crate) fn set_position(&mut self, position: Option<f64>) {
        self.props.current_position = position;
    }

    pub(crate) fn set_bounds(&mut self, min: f64, max: f64) {
        self.props.min = min;
        self.props.max = max;
    }

    pub(crate) fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    pub(crate) fn is_capturing(&self) -> bool {
        self.state != DragState::None
    }

    /// Feeds one event through [`reduce`] and folds the resulting value
    /// changes into the local props, so consecutive moves see the latest
    /// endpoints before the owner has applied them.
    pub(crate) fn handle(&mut self, event: PointerEvent) -> Vec<SliderEffect> {
        let (state, effects) = reduce(self.state, &self.props, &self.geometry, event);
        self.state = state;

        for effect in &effects {
            match *effect {
                SliderEffect::StartChanged(v) => self.props.start_time = v,
                SliderEffect::EndChanged(v) => self.props.end_time = v,
                _ => {}
            }
        }

        effects
    }

    /// A press at `x`, hit-tested against the recorded geometry.
    pub(crate) fn press(&mut self, x: u16) -> Vec<SliderEffect> {
        let target = self.geometry.hit_test(x, &self.props);
        self.handle(PointerEvent::Down { x, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> SliderProps {
        SliderProps {
            min: 0.0,
            max: 100.0,
            start_time: 20.0,
            end_time: 60.0,
            current_position: None,
        }
    }

    // Track of 101 cells starting at column 10: one column per second.
    const GEOMETRY: TrackGeometry = TrackGeometry { left: 10, width: 100, row: 3 };

    fn slider() -> RangeSlider {
        let mut slider = RangeSlider::new(props());
        slider.geometry = GEOMETRY;
        slider
    }

    fn assert_invariant(props: &SliderProps) {
        assert!(props.start_time < props.end_time, "{props:?}");
        assert!(props.start_time >= props.min, "{props:?}");
        assert!(props.end_time <= props.max, "{props:?}");
    }

    #[test]
    fn maps_columns_to_whole_values() {
        let p = props();
        assert_eq!(GEOMETRY.value_at(10, &p), 0.0);
        assert_eq!(GEOMETRY.value_at(35, &p), 25.0);
        assert_eq!(GEOMETRY.value_at(110, &p), 100.0);
        assert_eq!(GEOMETRY.value_at(0, &p), 0.0);
        assert_eq!(GEOMETRY.value_at(500, &p), 100.0);
        assert_eq!(GEOMETRY.column_of(60.0, &p), 70);
    }

    #[test]
    fn zero_width_tracks_map_to_min() {
        let geometry = TrackGeometry { left: 4, width: 0, row: 0 };
        assert_eq!(geometry.value_at(40, &props()), 0.0);
    }

    #[test]
    fn hit_testing_prefers_the_nearest_handle() {
        let p = props();
        assert_eq!(GEOMETRY.hit_test(30, &p), PressTarget::StartHandle);
        assert_eq!(GEOMETRY.hit_test(31, &p), PressTarget::StartHandle);
        assert_eq!(GEOMETRY.hit_test(69, &p), PressTarget::EndHandle);
        assert_eq!(GEOMETRY.hit_test(50, &p), PressTarget::Track);

        let close = SliderProps { start_time: 40.0, end_time: 41.0, ..p };
        assert_eq!(GEOMETRY.hit_test(49, &close), PressTarget::StartHandle);
        assert_eq!(GEOMETRY.hit_test(50, &close), PressTarget::StartHandle);
        assert_eq!(GEOMETRY.hit_test(51, &close), PressTarget::EndHandle);

        let stacked = SliderProps { start_time: 40.0, end_time: 40.0, ..p };
        assert_eq!(GEOMETRY.hit_test(50, &stacked), PressTarget::StartHandle);
        assert_eq!(GEOMETRY.hit_test(51, &stacked), PressTarget::EndHandle);
    }

    #[test]
    fn dragging_the_start_handle_stops_before_the_end() {
        let mut slider = slider();
        assert_eq!(slider.press(30), vec![SliderEffect::CapturePointer]);
        assert!(slider.is_capturing());

        assert_eq!(slider.handle(PointerEvent::Move { x: 45 }), vec![SliderEffect::StartChanged(35.0)]);
        assert_eq!(slider.handle(PointerEvent::Move { x: 105 }), vec![SliderEffect::StartChanged(59.0)]);
        assert_eq!(slider.handle(PointerEvent::Move { x: 0 }), vec![SliderEffect::StartChanged(0.0)]);

        assert_eq!(slider.handle(PointerEvent::Up), vec![SliderEffect::ReleasePointer]);
        assert!(!slider.is_capturing());
    }

    #[test]
    fn dragging_the_end_handle_stops_after_the_start() {
        let mut slider = slider();
        slider.press(70);

        assert_eq!(slider.handle(PointerEvent::Move { x: 12 }), vec![SliderEffect::EndChanged(21.0)]);
        assert_eq!(slider.handle(PointerEvent::Move { x: 200 }), vec![SliderEffect::EndChanged(100.0)]);
    }

    #[test]
    fn pressing_the_track_seeks_on_press_and_move() {
        let mut slider = slider();
        assert_eq!(
            slider.press(50),
            vec![SliderEffect::CapturePointer, SliderEffect::Seek(40.0)]
        );
        assert_eq!(slider.handle(PointerEvent::Move { x: 90 }), vec![SliderEffect::Seek(80.0)]);
        assert_eq!(slider.props().start_time, 20.0);
        assert_eq!(slider.props().end_time, 60.0);
    }

    #[test]
    fn moves_and_releases_without_a_drag_do_nothing() {
        let mut slider = slider();
        assert!(slider.handle(PointerEvent::Move { x: 50 }).is_empty());
        assert!(slider.handle(PointerEvent::Up).is_empty());
    }

    #[test]
    fn a_new_press_replaces_the_drag_in_progress() {
        let mut slider = slider();
        slider.press(30);
        slider.press(70);

        assert_eq!(slider.handle(PointerEvent::Move { x: 80 }), vec![SliderEffect::EndChanged(70.0)]);
        assert_eq!(slider.props().start_time, 20.0);
    }

    #[test]
    fn nudges_respect_the_same_bounds() {
        let mut slider = slider();
        assert_eq!(
            slider.handle(PointerEvent::Nudge { handle: Handle::Start, delta: -50.0 }),
            vec![SliderEffect::StartChanged(0.0)]
        );
        assert_eq!(
            slider.handle(PointerEvent::Nudge { handle: Handle::End, delta: -100.0 }),
            vec![SliderEffect::EndChanged(1.0)]
        );
        assert!(!slider.is_capturing());
    }

    #[test]
    fn endpoints_stay_ordered_and_bounded_across_drag_sequences() {
        let mut slider = slider();
        let columns = [0u16, 10, 25, 59, 60, 61, 70, 95, 110, 140, 11, 69, 30];

        for &grab in &[30u16, 70, 50] {
            for &x in &columns {
                slider.press(grab);
                assert_invariant(slider.props());
                for &to in &columns {
                    slider.handle(PointerEvent::Move { x: to });
                    assert_invariant(slider.props());
                }
                slider.handle(PointerEvent::Move { x });
                slider.handle(PointerEvent::Up);
                assert_invariant(slider.props());
            }
        }
    }
}
