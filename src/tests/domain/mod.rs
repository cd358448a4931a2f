mod template_tests;
