//! Scroll and pointer driven motion, kept free of DOM access so it can be
//! exercised on the host.

use crate::config;

/// Progress through `[start, end]` for a scroll offset, clamped to `0..=1`.
pub fn scroll_fraction(scroll_y: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if scroll_y > start { 1.0 } else { 0.0 };
    }
    ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Follows a scroll-derived target playhead with exponential smoothing.
#[derive(Debug, Clone)]
pub struct VideoScrubber {
    target: f64,
    current: f64,
    lerp: f64,
    threshold: f64,
}

impl Default for VideoScrubber {
    fn default() -> Self {
        Self::new(config::SCRUB_LERP, config::SEEK_THRESHOLD_S)
    }
}

impl VideoScrubber {
    pub fn new(lerp: f64, threshold: f64) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            lerp: lerp.clamp(0.0, 1.0),
            threshold,
        }
    }

    /// Requested time for a scroll fraction, or `None` while the duration
    /// is unknown (NaN before metadata, or not positive).
    pub fn requested_time(fraction: f64, duration: f64) -> Option<f64> {
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }
        Some(fraction.clamp(0.0, 1.0) * duration)
    }

    /// Retargets the follower. An unknown duration keeps the previous target.
    pub fn set_progress(&mut self, fraction: f64, duration: f64) {
        if let Some(time) = Self::requested_time(fraction, duration) {
            self.target = time;
        }
    }

    /// Advance one frame. Returns the time to seek to, if the playhead is
    /// further than the threshold from the smoothed time.
    pub fn tick(&mut self, playhead: f64) -> Option<f64> {
        self.current = lerp(self.current, self.target, self.lerp);
        if (playhead - self.current).abs() > self.threshold {
            Some(self.current)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Reports crossings of a scroll region's boundaries.
#[derive(Debug, Clone, Default)]
pub struct RegionTracker {
    last: Option<f64>,
    active: bool,
}

impl RegionTracker {
    pub fn update(&mut self, scroll_y: f64, start: f64, end: f64) -> Option<RegionEvent> {
        let now_active = scroll_y > start && scroll_y < end;
        let forward = self.last.map_or(true, |last| scroll_y >= last);
        self.last = Some(scroll_y);
        if now_active == self.active {
            return None;
        }
        self.active = now_active;
        Some(match (now_active, forward) {
            (true, true) => RegionEvent::Enter,
            (true, false) => RegionEvent::EnterBack,
            (false, true) => RegionEvent::Leave,
            (false, false) => RegionEvent::LeaveBack,
        })
    }
}

/// Horizontal distance the gallery strip travels while pinned.
pub fn pin_distance(strip_width: f64, viewport_width: f64) -> f64 {
    (strip_width - viewport_width).max(0.0)
}

pub fn strip_offset(fraction: f64, distance: f64) -> f64 {
    -fraction.clamp(0.0, 1.0) * distance.max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleFade {
    pub scale: f64,
    pub opacity: f64,
}

/// Hero title zoom-out over the first 80% of the video region.
pub fn title_fade(region_fraction: f64) -> TitleFade {
    let t = (region_fraction / 0.8).clamp(0.0, 1.0);
    TitleFade {
        scale: lerp(1.0, 3.0, t),
        opacity: 1.0 - t,
    }
}

pub fn power2_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn power1_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn back_out(t: f64, overshoot: f64) -> f64 {
    let c3 = overshoot + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + overshoot * (t - 1.0).powi(2)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub scale: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub glow: f64,
}

impl LogoPose {
    const REST: LogoPose = LogoPose {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        rotate_z: 0.0,
        glow: 0.0,
    };

    fn blend(&self, to: &LogoPose, t: f64) -> LogoPose {
        LogoPose {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            z: lerp(self.z, to.z, t),
            scale: lerp(self.scale, to.scale, t),
            rotate_x: lerp(self.rotate_x, to.rotate_x, t),
            rotate_y: lerp(self.rotate_y, to.rotate_y, t),
            rotate_z: lerp(self.rotate_z, to.rotate_z, t),
            glow: lerp(self.glow, to.glow, t),
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) translate3d({:.1}px, {:.1}px, {:.1}px) scale({:.3}) rotateX({:.1}deg) rotateY({:.1}deg) rotateZ({:.1}deg)",
            self.x, self.y, self.z, self.scale, self.rotate_x, self.rotate_y, self.rotate_z
        )
    }

    pub fn filter(&self) -> String {
        if self.glow <= 0.0 {
            return "none".to_string();
        }
        format!(
            "drop-shadow(0 0 {:.0}px rgba(255, 204, 0, {:.2})) drop-shadow(0 0 {:.0}px rgba(164, 22, 35, {:.2}))",
            50.0 * self.glow,
            self.glow,
            100.0 * self.glow,
            0.8 * self.glow
        )
    }
}

/// Crest flight from the hero title down to the target band: lift-off (30%),
/// arc (50%), landing (20%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoFlight {
    pub delta_x: f64,
    pub delta_y: f64,
}

impl LogoFlight {
    pub const START: f64 = 0.6;

    pub fn new(delta_x: f64, delta_y: f64) -> Self {
        Self { delta_x, delta_y }
    }

    fn keyframes(&self) -> [LogoPose; 3] {
        let lift = LogoPose {
            scale: 1.8,
            rotate_y: 180.0,
            rotate_x: 15.0,
            z: 300.0,
            glow: 0.6,
            ..LogoPose::REST
        };
        let arc = LogoPose {
            x: self.delta_x,
            y: self.delta_y,
            z: 150.0,
            scale: 0.6,
            rotate_x: -10.0,
            rotate_y: 540.0,
            rotate_z: 360.0,
            glow: 1.0,
        };
        let land = LogoPose {
            x: self.delta_x,
            y: self.delta_y,
            z: 0.0,
            scale: 0.8,
            rotate_x: 0.0,
            rotate_y: 720.0,
            rotate_z: 0.0,
            glow: 0.4,
        };
        [lift, arc, land]
    }

    /// Pose for a fraction of the whole video region.
    pub fn pose(&self, region_fraction: f64) -> LogoPose {
        let t = ((region_fraction - Self::START) / (1.0 - Self::START)).clamp(0.0, 1.0);
        let [lift, arc, land] = self.keyframes();
        if t <= 0.3 {
            LogoPose::REST.blend(&lift, power2_out(t / 0.3))
        } else if t <= 0.8 {
            lift.blend(&arc, power1_in_out((t - 0.3) / 0.5))
        } else {
            arc.blend(&land, back_out((t - 0.8) / 0.2, 1.7))
        }
    }
}

/// Reveal progress of an element whose top edge moves from `start` to `end`
/// (fractions of the viewport height measured from the top).
pub fn entrance(top: f64, viewport_height: f64, start: f64, end: f64) -> f64 {
    scroll_fraction(-top, -start * viewport_height, -end * viewport_height)
}

/// Per-row reveal with the stagger spread over `amount` of the timeline.
pub fn staggered(progress: f64, index: usize, count: usize, amount: f64) -> f64 {
    if count <= 1 {
        return progress.clamp(0.0, 1.0);
    }
    let amount = amount.clamp(0.0, 0.95);
    let delay = amount * index as f64 / (count - 1) as f64;
    ((progress - delay) / (1.0 - amount)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

/// Rotation for a heading tracking the pointer within its bounding box.
pub fn tilt(pointer_x: f64, pointer_y: f64, left: f64, top: f64, width: f64, height: f64) -> Tilt {
    if width <= 0.0 || height <= 0.0 {
        return Tilt::default();
    }
    let x = (pointer_x - left - width / 2.0) / width;
    let y = (pointer_y - top - height / 2.0) / height;
    Tilt {
        rotate_x: y * -30.0,
        rotate_y: x * 30.0,
    }
}

/// Pointer position normalised to `[-1, 1]` on both axes.
pub fn parallax(client_x: f64, client_y: f64, viewport_width: f64, viewport_height: f64) -> (f64, f64) {
    if viewport_width <= 0.0 || viewport_height <= 0.0 {
        return (0.0, 0.0);
    }
    (
        ((client_x / viewport_width - 0.5) * 2.0).clamp(-1.0, 1.0),
        ((client_y / viewport_height - 0.5) * 2.0).clamp(-1.0, 1.0),
    )
}

/// Navigation density switches strictly above the threshold.
pub fn nav_is_compact(scroll_y: f64) -> bool {
    scroll_y > config::NAV_COMPACT_THRESHOLD_PX
}

/// Wraps a marquee offset into `(-width, 0]` so the duplicated text loops.
pub fn wrap_offset(offset: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let wrapped = offset % width;
    if wrapped > 0.0 {
        wrapped - width
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps_to_region() {
        assert_eq!(scroll_fraction(-20.0, 0.0, 100.0), 0.0);
        assert_eq!(scroll_fraction(50.0, 0.0, 100.0), 0.5);
        assert_eq!(scroll_fraction(500.0, 0.0, 100.0), 1.0);
        assert_eq!(scroll_fraction(10.0, 10.0, 10.0), 0.0);
        assert_eq!(scroll_fraction(11.0, 10.0, 10.0), 1.0);
    }

    #[test]
    fn requested_time_spans_the_clip() {
        assert_eq!(VideoScrubber::requested_time(0.0, 8.0), Some(0.0));
        assert_eq!(VideoScrubber::requested_time(1.0, 8.0), Some(8.0));
        assert_eq!(VideoScrubber::requested_time(0.5, f64::NAN), None);
        assert_eq!(VideoScrubber::requested_time(0.5, 0.0), None);

        let mut previous = 0.0;
        for step in 0..=100 {
            let time = VideoScrubber::requested_time(step as f64 / 100.0, 8.0).unwrap();
            assert!(time >= previous);
            previous = time;
        }
    }

    #[test]
    fn scrubber_converges_and_skips_small_seeks() {
        let mut scrubber = VideoScrubber::new(0.1, 0.02);
        scrubber.set_progress(1.0, 4.0);
        assert_eq!(VideoScrubber::requested_time(1.0, 4.0), Some(4.0));

        let mut playhead = 0.0;
        let mut seeks = 0;
        for _ in 0..200 {
            if let Some(seek) = scrubber.tick(playhead) {
                playhead = seek;
                seeks += 1;
            }
        }
        assert!((playhead - 4.0).abs() < 0.021);
        assert!(seeks < 200);
        assert_eq!(scrubber.tick(playhead), None);
    }

    #[test]
    fn unknown_duration_keeps_the_playhead_in_place() {
        let mut scrubber = VideoScrubber::default();
        scrubber.set_progress(0.5, 8.0);
        let mut playhead = 0.0;
        for _ in 0..200 {
            if let Some(seek) = scrubber.tick(playhead) {
                playhead = seek;
            }
        }
        assert!((playhead - 4.0).abs() < 0.021);

        // Source swapped, metadata for the new source not loaded yet.
        scrubber.set_progress(0.5, f64::NAN);
        scrubber.set_progress(0.7, f64::INFINITY);
        for _ in 0..200 {
            if let Some(seek) = scrubber.tick(playhead) {
                playhead = seek;
            }
        }
        assert!((playhead - 4.0).abs() < 0.021);
    }

    #[test]
    fn first_tick_moves_a_tenth_of_the_way() {
        let mut scrubber = VideoScrubber::default();
        scrubber.set_progress(0.5, 10.0);
        assert_eq!(scrubber.tick(0.0), Some(0.5));
    }

    #[test]
    fn region_tracker_reports_all_crossings() {
        let mut tracker = RegionTracker::default();
        assert_eq!(tracker.update(0.0, 0.0, 1000.0), None);
        assert_eq!(tracker.update(10.0, 0.0, 1000.0), Some(RegionEvent::Enter));
        assert_eq!(tracker.update(500.0, 0.0, 1000.0), None);
        assert_eq!(tracker.update(1200.0, 0.0, 1000.0), Some(RegionEvent::Leave));
        assert_eq!(tracker.update(900.0, 0.0, 1000.0), Some(RegionEvent::EnterBack));
        assert_eq!(tracker.update(0.0, 0.0, 1000.0), Some(RegionEvent::LeaveBack));
        assert_eq!(tracker.update(-5.0, 0.0, 1000.0), None);
    }

    #[test]
    fn pinned_strip_ends_flush_with_viewport() {
        let distance = pin_distance(2600.0, 1200.0);
        assert_eq!(distance, 1400.0);
        assert_eq!(strip_offset(0.0, distance), 0.0);
        assert_eq!(strip_offset(1.0, distance), -1400.0);
        assert_eq!(strip_offset(1.5, distance), -1400.0);
        assert_eq!(pin_distance(800.0, 1200.0), 0.0);
        assert_eq!(strip_offset(1.0, pin_distance(800.0, 1200.0)), 0.0);
    }

    #[test]
    fn title_is_gone_at_eighty_percent() {
        assert_eq!(title_fade(0.0), TitleFade { scale: 1.0, opacity: 1.0 });
        assert_eq!(title_fade(0.8), TitleFade { scale: 3.0, opacity: 0.0 });
        assert_eq!(title_fade(1.0), TitleFade { scale: 3.0, opacity: 0.0 });
    }

    #[test]
    fn eases_hit_their_endpoints() {
        let eases: [fn(f64) -> f64; 3] = [power2_out, power1_in_out, |t| back_out(t, 1.7)];
        for ease in eases {
            assert!(ease(0.0).abs() < 1e-9);
            assert!((ease(1.0) - 1.0).abs() < 1e-9);
        }
        assert!(back_out(0.7, 1.7) > 1.0);
    }

    #[test]
    fn logo_flight_rests_then_lands_on_target() {
        let flight = LogoFlight::new(120.0, 900.0);
        assert_eq!(flight.pose(0.0), LogoPose::REST);
        assert_eq!(flight.pose(LogoFlight::START), LogoPose::REST);

        let landed = flight.pose(1.0);
        assert!((landed.x - 120.0).abs() < 1e-9);
        assert!((landed.y - 900.0).abs() < 1e-9);
        assert!((landed.scale - 0.8).abs() < 1e-9);
        assert!((landed.rotate_y - 720.0).abs() < 1e-9);
        assert_eq!(LogoPose::REST.filter(), "none");
    }

    #[test]
    fn entrance_runs_between_viewport_marks() {
        // Element top at 85% of an 800px viewport has not started.
        assert_eq!(entrance(680.0, 800.0, 0.85, 0.5), 0.0);
        assert_eq!(entrance(400.0, 800.0, 0.85, 0.5), 1.0);
        let mid = entrance(540.0, 800.0, 0.85, 0.5);
        assert!((mid - 0.5).abs() < 1e-9);
    }

    #[test]
    fn stagger_delays_later_rows() {
        assert_eq!(staggered(0.0, 0, 7, 0.5), 0.0);
        assert_eq!(staggered(1.0, 6, 7, 0.5), 1.0);
        assert!(staggered(0.4, 0, 7, 0.5) > staggered(0.4, 6, 7, 0.5));
        assert_eq!(staggered(0.3, 0, 1, 0.5), 0.3);
    }

    #[test]
    fn tilt_is_centred_and_bounded() {
        assert_eq!(tilt(150.0, 50.0, 100.0, 0.0, 100.0, 100.0), Tilt::default());
        let corner = tilt(100.0, 0.0, 100.0, 0.0, 100.0, 100.0);
        assert_eq!(corner, Tilt { rotate_x: 15.0, rotate_y: -15.0 });
        assert_eq!(tilt(1.0, 1.0, 0.0, 0.0, 0.0, 10.0), Tilt::default());
    }

    #[test]
    fn parallax_is_normalised() {
        assert_eq!(parallax(500.0, 400.0, 1000.0, 800.0), (0.0, 0.0));
        assert_eq!(parallax(0.0, 800.0, 1000.0, 800.0), (-1.0, 1.0));
        assert_eq!(parallax(10.0, 10.0, 0.0, 800.0), (0.0, 0.0));
    }

    #[test]
    fn nav_switches_exactly_past_threshold() {
        assert!(!nav_is_compact(0.0));
        assert!(!nav_is_compact(50.0));
        assert!(nav_is_compact(50.5));
        assert!(!nav_is_compact(49.9));
    }

    #[test]
    fn marquee_offset_wraps() {
        assert_eq!(wrap_offset(0.0, 300.0), 0.0);
        assert_eq!(wrap_offset(-350.0, 300.0), -50.0);
        assert_eq!(wrap_offset(50.0, 300.0), -250.0);
        assert_eq!(wrap_offset(10.0, 0.0), 0.0);
    }
}
