pub const ROOTS: &str = r"
      _.-'''-._
    .'  o   o  '.
    |  rootstat |
     '._______.'
    __/|     |\__
   /  \|     |/  \
  |    |     |    |
   \___/\___/\___/
";
