//! Projection of AIS contacts into the camera's pixel frame
//!
//! A contact's geodetic position is converted to an ENU offset at the
//! observer, rotated/translated into the camera frame through the mount
//! configuration, then pushed through a pinhole model. Contacts behind the
//! camera or at zero horizontal range are rejected (returned as `None`) and
//! take no part in the matching round.

use log::debug;
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::geo::geodetic_to_enu;
use crate::types::AisContact;

/// Two-term radial lens distortion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distortion {
    pub k1: f64,
    pub k2: f64,
}

/// Pinhole camera intrinsics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Horizontal focal length in pixels
    pub fx: f64,
    /// Vertical focal length in pixels
    pub fy: f64,
    /// Principal point x
    pub cx: f64,
    /// Principal point y
    pub cy: f64,
    /// Optional radial distortion, applied in full camera mode only
    pub distortion: Option<Distortion>,
}

impl CameraIntrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            distortion: None,
        }
    }

    pub fn with_distortion(mut self, distortion: Distortion) -> Self {
        self.distortion = Some(distortion);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.fx.is_finite() && self.fx > 0.0 && self.fy.is_finite() && self.fy > 0.0) {
            return Err(MatchError::intrinsics(format!(
                "focal lengths must be positive and finite, got fx={} fy={}",
                self.fx, self.fy
            )));
        }
        if !(self.cx.is_finite() && self.cy.is_finite()) {
            return Err(MatchError::intrinsics("principal point must be finite"));
        }
        Ok(())
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        // 1080p maritime camera used by the reference data set
        Self::new(1600.0, 1600.0, 960.0, 540.0)
    }
}

/// Camera placement relative to the observer platform.
///
/// The camera base frame is x-right (east at zero yaw), y-down, z-forward
/// (north at zero yaw). Yaw pans about the down axis, pitch tilts about the
/// right axis, roll twists about the optical axis; all in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraMount {
    /// Offset from the GNSS reference in meters: right, forward, up
    pub offset: (f64, f64, f64),
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl CameraMount {
    fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.roll)
    }
}

/// The observer's own position and camera placement, fixed per correlation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverPose {
    /// Own latitude in degrees (WGS-84)
    pub latitude: f64,
    /// Own longitude in degrees (WGS-84)
    pub longitude: f64,
    /// Own altitude in meters
    pub altitude: f64,
    /// Camera mounting; identity placement when absent
    pub mount: Option<CameraMount>,
}

impl ObserverPose {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
            mount: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_mount(mut self, mount: CameraMount) -> Self {
        self.mount = Some(mount);
        self
    }
}

/// Which projection path the engine runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Full ECEF/ENU/camera-frame pinhole projection
    #[default]
    FullCamera,
    /// Bearing-only projection along the horizontal axis with the vertical
    /// pixel fixed at the principal point row. Used when no calibrated camera
    /// mounting is available.
    BearingOnly,
}

/// Expected image-plane footprint of one contact, valid for one pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Expected pixel position of the vessel center
    pub pixel: (f64, f64),
    /// Expected apparent width in pixels, from the reported vessel length
    pub size_px: f64,
    /// Range to the contact in meters
    pub range_m: f64,
}

/// Project one AIS contact into the pixel frame.
///
/// Returns `None` when the contact is behind the camera or at zero horizontal
/// range; such contacts are excluded from the matching round entirely.
pub fn project(
    contact: &AisContact,
    observer: &ObserverPose,
    intrinsics: &CameraIntrinsics,
    mode: ProjectionMode,
) -> Option<Projection> {
    let enu = geodetic_to_enu(
        contact.latitude,
        contact.longitude,
        0.0,
        observer.latitude,
        observer.longitude,
        observer.altitude,
    );

    let horizontal_range = enu.xy().norm();
    if horizontal_range == 0.0 {
        debug!("contact {} at zero range, excluded", contact.mmsi);
        return None;
    }

    match mode {
        ProjectionMode::FullCamera => project_full(contact, observer, intrinsics, enu),
        ProjectionMode::BearingOnly => project_bearing_only(contact, intrinsics, enu),
    }
}

fn project_full(
    contact: &AisContact,
    observer: &ObserverPose,
    intrinsics: &CameraIntrinsics,
    enu: Vector3<f64>,
) -> Option<Projection> {
    let mount = observer.mount.unwrap_or_default();
    let (right, forward, up) = mount.offset;

    // ENU to the camera base frame: x right/east, y down, z forward/north
    let relative = enu - Vector3::new(right, forward, up);
    let base = Vector3::new(relative.x, -relative.z, relative.y);
    let cam = mount.rotation().inverse() * base;

    if cam.z <= 0.0 {
        debug!("contact {} behind the camera, excluded", contact.mmsi);
        return None;
    }

    let mut xn = cam.x / cam.z;
    let mut yn = cam.y / cam.z;
    if let Some(d) = intrinsics.distortion {
        let r2 = xn * xn + yn * yn;
        let scale = 1.0 + d.k1 * r2 + d.k2 * r2 * r2;
        xn *= scale;
        yn *= scale;
    }

    Some(Projection {
        pixel: (intrinsics.fx * xn + intrinsics.cx, intrinsics.fy * yn + intrinsics.cy),
        size_px: intrinsics.fx * contact.length / cam.z,
        range_m: cam.norm(),
    })
}

fn project_bearing_only(
    contact: &AisContact,
    intrinsics: &CameraIntrinsics,
    enu: Vector3<f64>,
) -> Option<Projection> {
    // Depth is the north component; the camera is assumed to face north
    if enu.y <= 0.0 {
        debug!("contact {} behind the camera, excluded", contact.mmsi);
        return None;
    }

    Some(Projection {
        pixel: (
            intrinsics.fx * enu.x / enu.y + intrinsics.cx,
            intrinsics.cy,
        ),
        size_px: intrinsics.fx * contact.length / enu.y,
        range_m: enu.xy().norm(),
    })
}
