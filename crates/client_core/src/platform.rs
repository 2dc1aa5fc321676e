/// Device families that differ in how AR is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// AR Quick Look: needs usdz and presents its own UI as soon as sources are set.
    Ios,
    /// Scene Viewer / WebXR: AR is activated explicitly once the glb has loaded.
    Android,
    /// No immersive AR; the model is shown as an interactive 3D preview.
    #[default]
    Desktop,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
            Platform::Ios
        } else if ua.contains("android") {
            Platform::Android
        } else {
            Platform::Desktop
        }
    }

    pub fn presents_native_ar_immediately(self) -> bool {
        self == Platform::Ios
    }

    pub fn activates_ar_after_load(self) -> bool {
        self == Platform::Android
    }

    pub fn requires_usdz(self) -> bool {
        self == Platform::Ios
    }
}
