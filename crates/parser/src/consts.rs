pub const EXPECT_IDENT: &str = "identifier";

pub const EXPECT_LITERAL: &str = "string or numeric literal";

pub const EXPECT_SELECT_ITEM: &str = "`*` or a string or numeric literal";

pub const EXPECT_DATATYPE: &str = "column type (INT or TEXT)";
