#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod scene;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

use scene::{
    GaussianSceneOptions, GaussianTangentScene, HomographyScene, HomographySceneOptions,
    SceneError,
};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Public entry point for consumers.
///
/// The engine owns the random source used for synthetic keypoints; seed it
/// with [`Engine::with_seed`] for reproducible output.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    rng: StdRng,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            rng: StdRng::from_os_rng(),
        }
    }

    #[wasm_bindgen]
    pub fn with_seed(seed: u64) -> Engine {
        Engine {
            initialized: true,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reseed the keypoint generator.
    #[wasm_bindgen]
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Build the Gaussian/tangent-plane scene. `options` may be `undefined`
    /// or a partial object; missing fields use their defaults.
    #[wasm_bindgen]
    pub fn gaussian_tangent_scene(&self, options: JsValue) -> Result<JsValue, JsValue> {
        let options: GaussianSceneOptions = options_from_js(options)?;
        let scene = self.gaussian_tangent(&options).map_err(to_js_error)?;
        to_js(&scene.export())
    }

    /// Build the homography scene, drawing keypoints from the engine RNG.
    #[wasm_bindgen]
    pub fn homography_scene(&mut self, options: JsValue) -> Result<JsValue, JsValue> {
        let options: HomographySceneOptions = options_from_js(options)?;
        let scene = self.homography(&options).map_err(to_js_error)?;
        to_js(&scene.export())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn gaussian_tangent(
        &self,
        options: &GaussianSceneOptions,
    ) -> Result<GaussianTangentScene, SceneError> {
        debug_log!("building gaussian scene with {:?}", options);
        scene::build_gaussian_tangent_scene(options)
    }

    pub fn homography(
        &mut self,
        options: &HomographySceneOptions,
    ) -> Result<HomographyScene, SceneError> {
        debug_log!("building homography scene with {:?}", options);
        scene::build_homography_scene(&mut self.rng, options)
    }
}

fn options_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error(err: SceneError) -> JsValue {
    JsError::new(&err.to_string()).into()
}
