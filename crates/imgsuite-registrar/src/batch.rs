/// Tests declared together, sharing enablement conditions and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub names: Vec<String>,
    pub suffix: Option<String>,
    pub test_name: Option<String>,
    /// Dataset directory the tests need, relative to the working root unless absolute.
    pub image_dir: Option<String>,
    /// Where to get the dataset, shown when it is missing.
    pub url: Option<String>,
    pub found_vars: Vec<String>,
    pub enable_vars: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Batch {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn test_name(mut self, test_name: impl Into<String>) -> Self {
        self.test_name = Some(test_name.into());
        self
    }

    pub fn image_dir(mut self, image_dir: impl Into<String>) -> Self {
        self.image_dir = Some(image_dir.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn found_var(mut self, name: impl Into<String>) -> Self {
        self.found_vars.push(name.into());
        self
    }

    pub fn enable_var(mut self, name: impl Into<String>) -> Self {
        self.enable_vars.push(name.into());
        self
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((name.into(), value.into()));
        self
    }
}

/// Feature test batches of the image library's test suite.
pub fn known_batches() -> Vec<Batch> {
    vec![
        Batch::new(["oiiotool", "oiiotool-color", "oiiotool-xform", "maketx"]),
        Batch::new(["png", "png-damaged"])
            .found_var("PNG_FOUND")
            .enable_var("ENABLE_PNG"),
        Batch::new(["gif"])
            .found_var("GIF_FOUND")
            .enable_var("ENABLE_GIF")
            .image_dir("oiio-images")
            .url("https://github.com/AcademySoftwareFoundation/OpenImageIO-images"),
        Batch::new(["tiff-suite", "tiff-depths", "tiff-misc"])
            .enable_var("ENABLE_TIFF")
            .image_dir("libtiffpic")
            .url("http://www.simplesystems.org/libtiff/images.html"),
        Batch::new([
            "openexr-suite",
            "openexr-multires",
            "openexr-chroma",
            "openexr-v2",
            "openexr-window",
        ])
        .found_var("OpenEXR_FOUND")
        .enable_var("ENABLE_OPENEXR")
        .image_dir("openexr-images")
        .url("http://github.com/AcademySoftwareFoundation/openexr-images"),
        Batch::new(["fits"])
            .enable_var("ENABLE_FITS")
            .image_dir("fits-images")
            .url("http://www.cv.nrao.edu/fits/data/tests/"),
        Batch::new(["jpeg2000"])
            .found_var("OPENJPEG_FOUND")
            .enable_var("ENABLE_OPENJPEG")
            .image_dir("j2kp4files_v1_5")
            .url("http://www.itu.int/net/ITU-T/sigdb/speimage/ImageForm-s.aspx?val=10100803"),
        Batch::new(["python-imagebuf", "python-imageinput", "python-imageoutput"])
            .found_var("Python_FOUND")
            .enable_var("USE_PYTHON"),
        Batch::new(["texture-crop", "texture-filtersize"])
            .suffix(".batch")
            .env("IMGSUITE_TEXTURE_BATCHED", "1"),
    ]
}
